//! Application state shared across handlers.

use std::sync::Arc;

use tracing::warn;

use boardgo_agent::NotificationAgent;
use boardgo_core::Settings;

use crate::auth::AuthVerifier;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Notification agent, or the reason it could not be built.
    agent: std::result::Result<NotificationAgent, Arc<str>>,
    /// Token verifier; `None` lets every request through.
    pub verifier: Option<Arc<AuthVerifier>>,
}

impl AppState {
    /// Creates a new AppState around a ready agent.
    pub fn new(config: ApiConfig, agent: NotificationAgent) -> Self {
        Self {
            config: Arc::new(config),
            agent: Ok(agent),
            verifier: None,
        }
    }

    /// Creates a state whose notification routes answer 503 with `reason`.
    pub fn unavailable(config: ApiConfig, reason: impl Into<String>) -> Self {
        Self {
            config: Arc::new(config),
            agent: Err(Arc::from(reason.into())),
            verifier: None,
        }
    }

    /// Builds the state from settings.
    ///
    /// Missing provider credentials do not prevent startup; the affected
    /// routes report 503 until the configuration is fixed. Previews only
    /// need the aviation-data key.
    pub fn from_settings(settings: &Settings, polish: bool) -> std::result::Result<Self, ApiError> {
        let config = ApiConfig::from_settings(settings);
        let mut state = match NotificationAgent::from_settings(settings, polish) {
            Ok(agent) => Self::new(config, agent),
            Err(e) => {
                warn!(error = %e, "Notification agent unavailable");
                Self::unavailable(config, e.to_string())
            }
        };

        if let Some(url) = &settings.auth_verify_url {
            let verifier = AuthVerifier::new(url, settings.api_timeout)
                .map_err(|e| ApiError::ServiceUnavailable(format!("HTTP client: {}", e)))?;
            state = state.with_verifier(verifier);
        }
        Ok(state)
    }

    /// Requires bearer tokens checked by `verifier`.
    pub fn with_verifier(mut self, verifier: AuthVerifier) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Returns the agent, or 503 when it is not configured.
    pub fn agent(&self) -> Result<&NotificationAgent> {
        self.agent
            .as_ref()
            .map_err(|reason| ApiError::ServiceUnavailable(reason.to_string()))
    }
}
