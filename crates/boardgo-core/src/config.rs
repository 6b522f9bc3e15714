//! Shared configuration for the BoardAndGo notifier.
//!
//! Provider credentials and endpoints come from environment variables only.
//! The binary loads `.env` files with `dotenvy` before building [`Settings`].
//!
//! # Storage Structure
//!
//! ```text
//! ~/.boardgo/
//! └── config/
//!     └── .env.local   # secrets (API keys, tokens)
//! ```
//!
//! # Environment Variables
//!
//! - `BOARDGO_STATE_DIR`: Override the base state directory
//! - `AVIATION_STACK_API_KEY`, `AVIATION_API_URL`, `API_TIMEOUT`
//! - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_FROM_NUMBER`, `TWILIO_API_URL`
//! - `OPENROUTER_API_KEY`, `OPENROUTER_MODEL`
//! - `AUTH_VERIFY_URL`
//! - `BOARDGO_HOST`, `BOARDGO_PORT`, `PROJECT_NAME`, `API_V1_STR`

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use thiserror::Error;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "BOARDGO_STATE_DIR";

pub const PROJECT_NAME_ENV: &str = "PROJECT_NAME";
pub const API_PREFIX_ENV: &str = "API_V1_STR";
pub const HOST_ENV: &str = "BOARDGO_HOST";
pub const PORT_ENV: &str = "BOARDGO_PORT";
pub const API_TIMEOUT_ENV: &str = "API_TIMEOUT";

pub const AVIATION_API_KEY_ENV: &str = "AVIATION_STACK_API_KEY";
pub const AVIATION_API_URL_ENV: &str = "AVIATION_API_URL";

pub const TWILIO_ACCOUNT_SID_ENV: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN_ENV: &str = "TWILIO_AUTH_TOKEN";
pub const TWILIO_FROM_NUMBER_ENV: &str = "TWILIO_FROM_NUMBER";
pub const TWILIO_API_URL_ENV: &str = "TWILIO_API_URL";

/// Environment variable for OpenRouter API key.
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const OPENROUTER_MODEL_ENV: &str = "OPENROUTER_MODEL";

/// External endpoint bearer tokens are forwarded to.
pub const AUTH_VERIFY_URL_ENV: &str = "AUTH_VERIFY_URL";

pub const DEFAULT_PROJECT_NAME: &str = "BoardAndGo flight notifier";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AVIATION_API_URL: &str = "https://api.aviationstack.com/v1/flights";
pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com/2010-04-01";

/// Default model to use for message polishing.
pub const DEFAULT_MODEL: &str = "anthropic/claude-sonnet-4";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".boardgo";

const CONFIG_SUBDIR: &str = "config";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the BoardAndGo state directory.
///
/// The state directory is determined by:
/// 1. `BOARDGO_STATE_DIR` environment variable if set
/// 2. `~/.boardgo` if home directory is available
/// 3. `.boardgo` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the user config directory.
pub fn config_dir() -> PathBuf {
    state_dir().join(CONFIG_SUBDIR)
}

/// Get the .env.local file path.
///
/// Environment file for secrets (API keys, tokens).
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Errors raised while building [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {message}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A variable required by the requested operation is not set.
    #[error("missing {0} environment variable")]
    Missing(&'static str),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Aviation-data provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AviationSettings {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl AviationSettings {
    /// Returns the API key or a [`ConfigError::Missing`].
    pub fn require_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::Missing(AVIATION_API_KEY_ENV))
    }
}

/// SMS provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioSettings {
    pub api_url: String,
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
}

/// Fully resolved SMS credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioCredentials<'a> {
    pub account_sid: &'a str,
    pub auth_token: &'a str,
    pub from_number: &'a str,
}

impl TwilioSettings {
    /// Returns all three credentials or the first missing variable.
    pub fn require_credentials(&self) -> Result<TwilioCredentials<'_>> {
        Ok(TwilioCredentials {
            account_sid: self
                .account_sid
                .as_deref()
                .ok_or(ConfigError::Missing(TWILIO_ACCOUNT_SID_ENV))?,
            auth_token: self
                .auth_token
                .as_deref()
                .ok_or(ConfigError::Missing(TWILIO_AUTH_TOKEN_ENV))?,
            from_number: self
                .from_number
                .as_deref()
                .ok_or(ConfigError::Missing(TWILIO_FROM_NUMBER_ENV))?,
        })
    }
}

/// Language-model settings for message polishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub model: String,
}

impl LlmSettings {
    /// Polishing is available only when a key is configured.
    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Typed view of the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub project_name: String,
    pub api_prefix: String,
    pub host: String,
    pub port: u16,
    pub api_timeout: Duration,
    pub aviation: AviationSettings,
    pub twilio: TwilioSettings,
    pub llm: LlmSettings,
    pub auth_verify_url: Option<String>,
}

impl Settings {
    /// Builds settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let port = match get(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT_ENV,
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get(API_TIMEOUT_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: API_TIMEOUT_ENV,
                message: e.to_string(),
            })?,
            None => DEFAULT_API_TIMEOUT_SECS,
        };

        Ok(Self {
            project_name: get_or(PROJECT_NAME_ENV, DEFAULT_PROJECT_NAME),
            api_prefix: get_or(API_PREFIX_ENV, DEFAULT_API_PREFIX),
            host: get_or(HOST_ENV, DEFAULT_HOST),
            port,
            api_timeout: Duration::from_secs(timeout_secs),
            aviation: AviationSettings {
                api_url: get_or(AVIATION_API_URL_ENV, DEFAULT_AVIATION_API_URL),
                api_key: get(AVIATION_API_KEY_ENV),
            },
            twilio: TwilioSettings {
                api_url: get_or(TWILIO_API_URL_ENV, DEFAULT_TWILIO_API_URL),
                account_sid: get(TWILIO_ACCOUNT_SID_ENV),
                auth_token: get(TWILIO_AUTH_TOKEN_ENV),
                from_number: get(TWILIO_FROM_NUMBER_ENV),
            },
            llm: LlmSettings {
                api_key: get(OPENROUTER_API_KEY_ENV),
                model: get_or(OPENROUTER_MODEL_ENV, DEFAULT_MODEL),
            },
            auth_verify_url: get(AUTH_VERIFY_URL_ENV),
        })
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            aviation: AviationSettings {
                api_url: DEFAULT_AVIATION_API_URL.to_string(),
                api_key: None,
            },
            twilio: TwilioSettings {
                api_url: DEFAULT_TWILIO_API_URL.to_string(),
                account_sid: None,
                auth_token: None,
                from_number: None,
            },
            llm: LlmSettings {
                api_key: None,
                model: DEFAULT_MODEL.to_string(),
            },
            auth_verify_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_empty() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.bind_address(), "127.0.0.1:8000");
        assert_eq!(settings.api_timeout, Duration::from_secs(30));
        assert!(!settings.llm.is_available());
    }

    #[test]
    fn test_reads_provider_settings() {
        let settings = Settings::from_lookup(lookup_from(&[
            (AVIATION_API_KEY_ENV, "av-key"),
            (TWILIO_ACCOUNT_SID_ENV, "AC123"),
            (TWILIO_AUTH_TOKEN_ENV, "secret"),
            (TWILIO_FROM_NUMBER_ENV, "+15550000"),
            (OPENROUTER_API_KEY_ENV, "or-key"),
            (PORT_ENV, "9000"),
            (API_TIMEOUT_ENV, "5"),
        ]))
        .unwrap();

        assert_eq!(settings.aviation.require_key().unwrap(), "av-key");
        let creds = settings.twilio.require_credentials().unwrap();
        assert_eq!(creds.account_sid, "AC123");
        assert_eq!(creds.from_number, "+15550000");
        assert!(settings.llm.is_available());
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.api_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let settings =
            Settings::from_lookup(lookup_from(&[(AVIATION_API_KEY_ENV, "  ")])).unwrap();
        assert!(matches!(
            settings.aviation.require_key(),
            Err(ConfigError::Missing(AVIATION_API_KEY_ENV))
        ));
    }

    #[test]
    fn test_missing_twilio_credential_is_named() {
        let settings = Settings::from_lookup(lookup_from(&[
            (TWILIO_ACCOUNT_SID_ENV, "AC123"),
            (TWILIO_AUTH_TOKEN_ENV, "secret"),
        ]))
        .unwrap();

        let err = settings.twilio.require_credentials().unwrap_err();
        assert_eq!(err.to_string(), "missing TWILIO_FROM_NUMBER environment variable");
    }

    #[test]
    fn test_invalid_port() {
        let err = Settings::from_lookup(lookup_from(&[(PORT_ENV, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: PORT_ENV, .. }));
    }

    #[test]
    fn test_env_file_under_config_dir() {
        assert!(env_file().starts_with(config_dir()));
        assert!(env_file().ends_with(".env.local"));
    }
}
