//! API configuration.

use std::time::Instant;

use boardgo_core::config::{DEFAULT_API_PREFIX, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROJECT_NAME};
use boardgo_core::Settings;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Name reported by the health endpoint.
    pub project_name: String,
    /// Prefix for versioned routes (e.g. `/api/v1`).
    pub api_prefix: String,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl ApiConfig {
    /// Creates a new API configuration with the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Builds the configuration from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.host, settings.port)
            .with_project_name(&settings.project_name)
            .with_api_prefix(&settings.api_prefix)
    }

    /// Sets the project name.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    /// Sets the route prefix, normalized to `/segment[/segment..]`.
    pub fn with_api_prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim().trim_matches('/');
        self.api_prefix = if trimmed.is_empty() {
            DEFAULT_API_PREFIX.to_string()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            start_time: Instant::now(),
        }
    }
}
