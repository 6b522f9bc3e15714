//! Renders notification text for a classified flight record.
//!
//! Output is plain SMS text built from fixed templates. The only branching
//! is on which optional fields the provider filled in.

use chrono::{DateTime, Utc};

use boardgo_models::{FlightStatusRecord, MessageCategory};

/// Timestamp layout used in messages.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Renders the notification text for `category`.
pub fn format_message(category: MessageCategory, record: &FlightStatusRecord) -> String {
    let mut parts = vec![headline(category, record), format!("Status: {}.", record.status)];

    match category {
        MessageCategory::Landing => {
            if let Some(time) = record.arrival_time() {
                parts.push(format!("Arrived {}.", format_time(time)));
            }
        }
        MessageCategory::Delay | MessageCategory::OnTrack => {
            if let Some(time) = record.departure_time() {
                parts.push(format!("Departure {}.", format_time(time)));
            }
            if let Some(time) = record.arrival_time() {
                parts.push(format!("Arrival {}.", format_time(time)));
            }
        }
    }

    if let Some(location) = location(record) {
        parts.push(location);
    }

    parts.join(" ")
}

fn headline(category: MessageCategory, record: &FlightStatusRecord) -> String {
    let code = &record.flight_code;
    match category {
        MessageCategory::Landing => match &record.arrival_airport {
            Some(airport) => format!("Flight {} has landed at {}.", code, airport),
            None => format!("Flight {} has landed.", code),
        },
        MessageCategory::Delay => match record.delay_minutes.filter(|m| *m > 0) {
            Some(minutes) => format!("Flight {} is delayed by {} minutes.", code, minutes),
            None => format!("Flight {} is delayed.", code),
        },
        MessageCategory::OnTrack => format!("Flight {} is on track.", code),
    }
}

fn location(record: &FlightStatusRecord) -> Option<String> {
    match (record.terminal.as_deref(), record.gate.as_deref()) {
        (Some(terminal), Some(gate)) => Some(format!("Terminal {}, gate {}.", terminal, gate)),
        (Some(terminal), None) => Some(format!("Terminal {}.", terminal)),
        (None, Some(gate)) => Some(format!("Gate {}.", gate)),
        (None, None) => None,
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}
