//! Notification agent for the BoardAndGo flight notifier.
//!
//! This crate wires the flight data source, the classifier, the formatter and
//! the SMS gateway into one pipeline:
//!
//! ```text
//! send_notification_for_flight(code, recipient)
//!     -> FlightStatusSource::fetch_status
//!     -> classify
//!     -> format_message
//!     -> MessagePolisher::polish   (optional, falls back to the template)
//!     -> SmsGateway::send_sms
//! ```
//!
//! # Core Types
//!
//! - [`NotificationAgent`]: runs the pipeline and returns a
//!   [`NotificationEnvelope`](boardgo_models::NotificationEnvelope)
//! - [`NotificationPreview`]: the message a run would send, without sending it
//! - [`MessagePolisher`]: optional rewording step, with [`LlmPolisher`] backed
//!   by OpenRouter
//! - [`AgentError`]: lookup, dispatch and model failures
//!
//! # Example
//!
//! ```ignore
//! use boardgo_agent::NotificationAgent;
//! use boardgo_core::Settings;
//!
//! let settings = Settings::from_env()?;
//! let agent = NotificationAgent::from_settings(&settings, true)?;
//! let envelope = agent
//!     .send_notification_for_flight("RJA3813", "+15551234567")
//!     .await?;
//! println!("{}", envelope.final_message().unwrap_or_default());
//! ```

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod polisher;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use agent::{NotificationAgent, NotificationPreview};
pub use client::{ChatMessage, ChatResponse, OpenRouterClient};
pub use config::ModelConfig;
pub use error::{AgentError, Result};
pub use polisher::{accept_polished, LlmPolisher, MessagePolisher, MAX_SMS_CHARS};
