//! Request DTOs for the API.

use serde::Deserialize;

/// Send notification request.
///
/// Fields are optional so that missing values are reported as 400 by the
/// handler rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateNotificationRequest {
    /// Flight code (IATA), e.g. `RJA3813`.
    #[serde(default)]
    pub flight_code: Option<String>,
    /// Recipient phone number.
    #[serde(default)]
    pub recipient_number: Option<String>,
}
