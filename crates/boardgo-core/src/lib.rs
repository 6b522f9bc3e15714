//! BoardAndGo Core - shared business logic for the notifier.
//!
//! - **classifier**: pick landing / delay / on-track for a flight record
//! - **config**: environment-driven settings and config paths
//! - **flight_code**: flight code normalization
//! - **formatter**: render SMS text for a classified record

pub mod classifier;
pub mod config;
pub mod flight_code;
pub mod formatter;

pub use classifier::classify;
pub use config::{
    config_dir, env_file, state_dir, AviationSettings, ConfigError, LlmSettings, Settings,
    TwilioCredentials, TwilioSettings,
};
pub use flight_code::normalize_flight_code;
pub use formatter::format_message;
