//! Provider traits.
//!
//! The agent and the API only ever talk to these traits, so any flight data
//! source or SMS gateway can be plugged in (and mocked in tests).

use async_trait::async_trait;

use boardgo_models::{FlightStatusRecord, NotificationResult};

use crate::error::{DispatchError, FlightLookupError};

/// Source of flight status snapshots.
#[async_trait]
pub trait FlightStatusSource: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Fetch the current status of `flight_code`.
    ///
    /// A single attempt is made; failures are returned to the caller.
    async fn fetch_status(&self, flight_code: &str) -> Result<FlightStatusRecord, FlightLookupError>;
}

/// Outbound SMS channel.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Send `body` to `recipient_number`.
    async fn send_sms(
        &self,
        recipient_number: &str,
        body: &str,
    ) -> Result<NotificationResult, DispatchError>;
}

/// Checks that a recipient number is present and returns it trimmed.
///
/// No format validation beyond non-emptiness; the provider is the authority
/// on what it can deliver to.
pub fn validate_recipient(recipient_number: &str) -> Result<&str, DispatchError> {
    let trimmed = recipient_number.trim();
    if trimmed.is_empty() {
        return Err(DispatchError::EmptyRecipient);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_recipient() {
        assert_eq!(validate_recipient(" +15550100 ").unwrap(), "+15550100");
        assert!(matches!(validate_recipient(""), Err(DispatchError::EmptyRecipient)));
        assert!(matches!(validate_recipient("  \t"), Err(DispatchError::EmptyRecipient)));
    }
}
