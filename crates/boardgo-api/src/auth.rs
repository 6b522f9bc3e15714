//! Bearer-token pass-through.
//!
//! When an auth verify URL is configured, every versioned route requires an
//! `Authorization: Bearer <token>` header. The token is forwarded unchanged
//! to the verify URL; only a 200 answer lets the request through.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Client for the external token verification service.
#[derive(Debug, Clone)]
pub struct AuthVerifier {
    client: reqwest::Client,
    verify_url: String,
}

impl AuthVerifier {
    /// Creates a verifier for `verify_url`.
    pub fn new(verify_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            verify_url: verify_url.into(),
        })
    }

    /// Returns the verification endpoint.
    pub fn verify_url(&self) -> &str {
        &self.verify_url
    }

    /// Asks the verification service whether `token` is valid.
    pub async fn verify(&self, token: &str) -> Result<()> {
        let response = self
            .client
            .get(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Authentication service unreachable");
                ApiError::ServiceUnavailable("authentication service unavailable".to_string())
            })?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => {
                debug!(status = status.as_u16(), "Token rejected");
                Err(ApiError::Unauthorized("invalid or expired token".to_string()))
            }
        }
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Middleware guarding the versioned routes.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(verifier) = &state.verifier {
        let token = bearer_token(request.headers())
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;
        verifier.verify(token).await?;
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_none());
        assert!(bearer_token(&headers("Bearer ")).is_none());
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }
}
