//! HTTP API for the BoardAndGo flight notifier.
//!
//! Routes:
//! - `GET /` and `GET /health`
//! - `GET {prefix}/flights/:flight_code/status`: preview the notification
//! - `POST {prefix}/notifications`: look up a flight and send the SMS
//!
//! `{prefix}` defaults to `/api/v1`. Versioned routes sit behind the
//! bearer pass-through in [`auth`] when a verify URL is configured.
//!
//! # Example
//!
//! ```ignore
//! use boardgo_api::{serve, AppState};
//! use boardgo_core::Settings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let state = AppState::from_settings(&settings, true)?;
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use auth::AuthVerifier;
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
