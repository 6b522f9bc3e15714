//! Response DTOs for the API.

use serde::Serialize;

/// Root endpoint response.
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Service name.
    pub message: String,
    /// API version.
    pub version: String,
    /// Server uptime in seconds.
    pub uptime_seconds: u64,
}
