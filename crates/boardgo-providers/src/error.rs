//! Error types for the provider clients.

use boardgo_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while looking up a flight.
#[derive(Error, Debug)]
pub enum FlightLookupError {
    /// Flight code is empty or malformed.
    #[error("invalid flight code: {0:?}")]
    InvalidFlightCode(String),

    /// Provider returned no flight for the code.
    #[error("flight not found: {0}")]
    NotFound(String),

    /// Provider rate limit exceeded.
    #[error("aviation data provider rate limit exceeded")]
    RateLimited,

    /// Provider answered with an error.
    #[error("aviation data provider error {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Provider error message.
        message: String,
    },

    /// Request could not be sent or no response was received.
    #[error("aviation data request failed: {0}")]
    Request(String),

    /// Response body could not be parsed.
    #[error("failed to parse aviation data response: {0}")]
    Parse(String),

    /// Required configuration is missing.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Errors that can occur while sending an SMS.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Recipient number is empty.
    #[error("recipient number is empty")]
    EmptyRecipient,

    /// Provider refused the message.
    #[error("SMS provider rejected message ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Provider error message.
        message: String,
    },

    /// Request could not be sent or no response was received.
    #[error("SMS request failed: {0}")]
    Request(String),

    /// Response body could not be parsed.
    #[error("failed to parse SMS provider response: {0}")]
    Parse(String),

    /// Required configuration is missing.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<ConfigError> for FlightLookupError {
    fn from(err: ConfigError) -> Self {
        FlightLookupError::Configuration(err.to_string())
    }
}

impl From<ConfigError> for DispatchError {
    fn from(err: ConfigError) -> Self {
        DispatchError::Configuration(err.to_string())
    }
}
