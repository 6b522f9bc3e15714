//! Root and health check handlers.

use axum::{extract::State, Json};

use crate::state::AppState;
use crate::types::{HealthResponse, WelcomeResponse};

/// GET / - Welcome message.
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to BoardAndGo flight tracking api".to_string(),
    })
}

/// GET /health - Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: state.config.project_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.config.uptime_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_health_handler() {
        let state = AppState::unavailable(ApiConfig::default(), "not configured");
        let response = health(State(state)).await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.message, "BoardAndGo flight notifier");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_root_handler() {
        let response = root().await;
        assert_eq!(response.message, "Welcome to BoardAndGo flight tracking api");
    }
}
