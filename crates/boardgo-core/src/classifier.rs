//! Maps a flight status snapshot to a notification category.

use boardgo_models::{FlightStatus, FlightStatusRecord, MessageCategory};
use tracing::trace;

/// Picks the notification category for a record.
///
/// Landing wins over delay: a flight that landed late is reported as landed.
pub fn classify(record: &FlightStatusRecord) -> MessageCategory {
    let category = if record.status.is_landed() {
        MessageCategory::Landing
    } else if record.has_positive_delay() || record.status == FlightStatus::Delayed {
        MessageCategory::Delay
    } else {
        MessageCategory::OnTrack
    };

    trace!(
        flight_code = %record.flight_code,
        status = %record.status,
        delay_minutes = ?record.delay_minutes,
        category = %category,
        "Classified flight record"
    );
    category
}
