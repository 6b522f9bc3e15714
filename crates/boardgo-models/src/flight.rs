//! Flight status types.
//!
//! A [`FlightStatusRecord`] is an immutable snapshot of one flight as reported
//! by the aviation-data provider. Records are fetched fresh for every
//! notification and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized flight status.
///
/// Provider strings are matched case-insensitively. Anything that is not a
/// known status is kept verbatim (lower-cased) in [`FlightStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlightStatus {
    /// The aircraft has touched down.
    Landed,
    /// The aircraft has reached the gate.
    Arrived,
    /// The flight is reported as delayed.
    Delayed,
    /// The flight is airborne or otherwise progressing normally.
    EnRoute,
    /// Any other provider status (scheduled, cancelled, diverted, ...).
    Other(String),
}

impl FlightStatus {
    /// Parses a provider status string.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "landed" => Self::Landed,
            "arrived" => Self::Arrived,
            "delayed" => Self::Delayed,
            "en route" | "en-route" | "enroute" | "active" => Self::EnRoute,
            _ => Self::Other(normalized),
        }
    }

    /// Returns the status as a lower-case string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Landed => "landed",
            Self::Arrived => "arrived",
            Self::Delayed => "delayed",
            Self::EnRoute => "en route",
            Self::Other(raw) => raw,
        }
    }

    /// True for `landed` and `arrived`.
    pub fn is_landed(&self) -> bool {
        matches!(self, Self::Landed | Self::Arrived)
    }
}

impl Default for FlightStatus {
    fn default() -> Self {
        Self::Other("unknown".to_string())
    }
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FlightStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for FlightStatus {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<FlightStatus> for String {
    fn from(status: FlightStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Snapshot of a flight's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStatusRecord {
    /// Flight code the record was fetched for (e.g. `RJA3813`).
    pub flight_code: String,

    /// Normalized status.
    pub status: FlightStatus,

    /// Operating airline name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,

    /// Departure airport name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_airport: Option<String>,

    /// Arrival airport name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_airport: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_departure: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_departure: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_arrival: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_arrival: Option<DateTime<Utc>>,

    /// Departure terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,

    /// Departure gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,

    /// Delay in minutes as reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_minutes: Option<i64>,
}

impl FlightStatusRecord {
    /// Creates a record with only a flight code and status set.
    pub fn new(flight_code: impl Into<String>, status: impl Into<FlightStatus>) -> Self {
        Self {
            flight_code: flight_code.into(),
            status: status.into(),
            airline: None,
            departure_airport: None,
            arrival_airport: None,
            scheduled_departure: None,
            actual_departure: None,
            scheduled_arrival: None,
            actual_arrival: None,
            terminal: None,
            gate: None,
            delay_minutes: None,
        }
    }

    /// Sets the delay in minutes.
    pub fn with_delay(mut self, minutes: i64) -> Self {
        self.delay_minutes = Some(minutes);
        self
    }

    /// Sets terminal and gate.
    pub fn with_location(mut self, terminal: Option<&str>, gate: Option<&str>) -> Self {
        self.terminal = terminal.map(str::to_string);
        self.gate = gate.map(str::to_string);
        self
    }

    /// Sets the airports.
    pub fn with_route(mut self, departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        self.departure_airport = Some(departure.into());
        self.arrival_airport = Some(arrival.into());
        self
    }

    /// Returns true if the provider reported a positive delay.
    pub fn has_positive_delay(&self) -> bool {
        self.delay_minutes.is_some_and(|m| m > 0)
    }

    /// Best known departure time: actual if present, otherwise scheduled.
    pub fn departure_time(&self) -> Option<DateTime<Utc>> {
        self.actual_departure.or(self.scheduled_departure)
    }

    /// Best known arrival time: actual if present, otherwise scheduled.
    pub fn arrival_time(&self) -> Option<DateTime<Utc>> {
        self.actual_arrival.or(self.scheduled_arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_parse_known() {
        assert_eq!(FlightStatus::parse("landed"), FlightStatus::Landed);
        assert_eq!(FlightStatus::parse("ARRIVED"), FlightStatus::Arrived);
        assert_eq!(FlightStatus::parse(" Delayed "), FlightStatus::Delayed);
        assert_eq!(FlightStatus::parse("en route"), FlightStatus::EnRoute);
        assert_eq!(FlightStatus::parse("active"), FlightStatus::EnRoute);
    }

    #[test]
    fn test_status_parse_other() {
        let status = FlightStatus::parse("Cancelled");
        assert_eq!(status, FlightStatus::Other("cancelled".to_string()));
        assert_eq!(status.as_str(), "cancelled");
        assert!(!status.is_landed());
    }

    #[test]
    fn test_status_serializes_as_string() {
        let json = serde_json::to_string(&FlightStatus::EnRoute).unwrap();
        assert_eq!(json, "\"en route\"");

        let parsed: FlightStatus = serde_json::from_str("\"landed\"").unwrap();
        assert!(parsed.is_landed());
    }

    #[test]
    fn test_record_builders() {
        let record = FlightStatusRecord::new("RJA3813", "delayed")
            .with_delay(45)
            .with_location(Some("2"), Some("B7"));

        assert_eq!(record.status, FlightStatus::Delayed);
        assert!(record.has_positive_delay());
        assert_eq!(record.terminal.as_deref(), Some("2"));
        assert_eq!(record.gate.as_deref(), Some("B7"));
    }

    #[test]
    fn test_record_zero_delay_is_not_positive() {
        let record = FlightStatusRecord::new("RJA3813", "en route").with_delay(0);
        assert!(!record.has_positive_delay());
    }

    #[test]
    fn test_best_known_times_prefer_actual() {
        let scheduled = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        let actual = Utc.with_ymd_and_hms(2025, 1, 10, 8, 40, 0).unwrap();

        let mut record = FlightStatusRecord::new("RJA3813", "en route");
        record.scheduled_departure = Some(scheduled);
        assert_eq!(record.departure_time(), Some(scheduled));

        record.actual_departure = Some(actual);
        assert_eq!(record.departure_time(), Some(actual));
        assert_eq!(record.arrival_time(), None);
    }
}
