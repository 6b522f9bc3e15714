//! Router configuration and server setup.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let versioned = Router::new()
        .route(
            "/flights/:flight_code/status",
            get(handlers::flight_status),
        )
        .route("/notifications", post(handlers::create_notification))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest(&state.config.api_prefix, versioned)
        .layer(cors)
        .with_state(state)
}

/// Starts the API server.
pub async fn serve(state: AppState) -> Result<(), std::io::Error> {
    let addr = state.config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        address = %addr,
        prefix = %state.config.api_prefix,
        auth = state.verifier.is_some(),
        "API server listening"
    );
    axum::serve(listener, create_router(state)).await
}
