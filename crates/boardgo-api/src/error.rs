//! API error types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use boardgo_agent::AgentError;
use boardgo_providers::{DispatchError, FlightLookupError};

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error type for consistent error responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or rejected bearer token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Upstream rate limit reached.
    #[error("too many requests: {0}")]
    TooManyRequests(String),

    /// An upstream provider failed.
    #[error("bad gateway: {error}")]
    BadGateway {
        /// Provider error text.
        error: String,
        /// Formatted notification that was not delivered, if any.
        message: Option<String>,
    },

    /// Service unavailable (missing configuration, auth service down).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::BadGateway {
                message: Some(message),
                ..
            } => json!({
                "error": self.to_string(),
                "message": message,
            }),
            _ => json!({
                "error": self.to_string()
            }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FlightLookupError> for ApiError {
    fn from(err: FlightLookupError) -> Self {
        match err {
            FlightLookupError::InvalidFlightCode(_) => ApiError::BadRequest(err.to_string()),
            FlightLookupError::NotFound(code) => ApiError::NotFound(format!("flight {}", code)),
            FlightLookupError::RateLimited => ApiError::TooManyRequests(err.to_string()),
            FlightLookupError::Configuration(msg) => ApiError::ServiceUnavailable(msg),
            FlightLookupError::Upstream { .. }
            | FlightLookupError::Request(_)
            | FlightLookupError::Parse(_) => ApiError::BadGateway {
                error: err.to_string(),
                message: None,
            },
        }
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Lookup(e) => e.into(),
            AgentError::Dispatch { message, source } => match source {
                DispatchError::EmptyRecipient => ApiError::BadRequest(source.to_string()),
                DispatchError::Configuration(msg) => ApiError::ServiceUnavailable(msg),
                _ => ApiError::BadGateway {
                    error: source.to_string(),
                    message: Some(message),
                },
            },
            AgentError::Configuration(msg) => ApiError::ServiceUnavailable(msg),
            AgentError::ModelInvocation(_) | AgentError::ResponseParse(_) => {
                ApiError::BadGateway {
                    error: err.to_string(),
                    message: None,
                }
            }
        }
    }
}
