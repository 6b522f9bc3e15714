//! Provider clients for the BoardAndGo flight notifier.
//!
//! - [`AviationStackClient`]: flight status lookups (implements [`FlightStatusSource`])
//! - [`TwilioClient`]: SMS delivery (implements [`SmsGateway`])
//!
//! Both clients make exactly one attempt per call. Failures surface as
//! [`FlightLookupError`] or [`DispatchError`] and are never retried here.

pub mod aviationstack;
pub mod error;
pub mod http;
pub mod traits;
pub mod twilio;

#[cfg(test)]
mod stub;

pub use aviationstack::AviationStackClient;
pub use error::{DispatchError, FlightLookupError};
pub use traits::{validate_recipient, FlightStatusSource, SmsGateway};
pub use twilio::TwilioClient;
