//! Error types for the agent crate.

use thiserror::Error;

use boardgo_providers::{DispatchError, FlightLookupError};

/// Errors that can occur in a notification run.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Flight lookup failed; nothing was sent.
    #[error(transparent)]
    Lookup(#[from] FlightLookupError),

    /// SMS dispatch failed. `message` is the text that was going to be sent,
    /// empty when the recipient was rejected before any lookup.
    #[error("{source}")]
    Dispatch {
        /// The message that was going to be sent.
        message: String,
        /// Provider error.
        #[source]
        source: DispatchError,
    },

    /// Model invocation failed.
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    /// Response parsing failed.
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// The lookup error, if this run failed while fetching flight data.
    pub fn lookup_error(&self) -> Option<&FlightLookupError> {
        match self {
            Self::Lookup(err) => Some(err),
            _ => None,
        }
    }

    /// The dispatch error, if this run failed while sending.
    pub fn dispatch_error(&self) -> Option<&DispatchError> {
        match self {
            Self::Dispatch { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The formatted message that was not delivered, for dispatch failures.
    ///
    /// `None` when dispatch failed before a message was produced.
    pub fn undelivered_message(&self) -> Option<&str> {
        match self {
            Self::Dispatch { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;
