//! Notification types.
//!
//! A notification run produces a [`NotificationEnvelope`]: the category the
//! classifier picked, a chat-style transcript of every pipeline step and the
//! [`NotificationResult`] returned by the SMS provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of notification produced for a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    /// The flight has landed or arrived.
    Landing,
    /// The flight is delayed.
    Delay,
    /// Nothing unusual to report.
    OnTrack,
}

impl MessageCategory {
    /// Returns the category as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Delay => "delay",
            Self::OnTrack => "on_track",
        }
    }
}

impl std::fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery status reported back by the SMS provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    /// Accepted by the provider.
    #[default]
    Sent,
    /// Accepted, but the provider already reports a delivery failure.
    Failed,
}

/// Outcome of sending one SMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Recipient phone number (E.164-like).
    pub recipient_number: String,

    /// Text that was sent.
    pub message_body: String,

    /// Provider-assigned message identifier.
    pub provider_message_id: String,

    /// Delivery status.
    pub status: DispatchStatus,

    /// When the provider accepted the message.
    pub sent_at: DateTime<Utc>,
}

impl NotificationResult {
    /// Creates a result with `sent_at` set to now.
    pub fn new(
        recipient_number: impl Into<String>,
        message_body: impl Into<String>,
        provider_message_id: impl Into<String>,
        status: DispatchStatus,
    ) -> Self {
        Self {
            recipient_number: recipient_number.into(),
            message_body: message_body.into(),
            provider_message_id: provider_message_id.into(),
            status,
            sent_at: Utc::now(),
        }
    }

    /// True when the provider accepted the message without reporting failure.
    pub fn is_sent(&self) -> bool {
        self.status == DispatchStatus::Sent
    }
}

/// Role of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptRole {
    /// Input supplied by the caller.
    User,
    /// Output of an external call (provider lookup, SMS send).
    Tool,
    /// Text produced by the notifier itself.
    Assistant,
}

/// One step of a notification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Who produced the entry.
    pub role: TranscriptRole,

    /// Pipeline step name (`fetch_flight_status`, `classify`, ...).
    pub step: String,

    /// Entry content.
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(role: TranscriptRole, step: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role,
            step: step.into(),
            content: content.into(),
        }
    }
}

/// Result envelope of a notification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    /// Unique identifier for this run.
    pub id: Uuid,

    /// Flight the notification was about.
    pub flight_code: String,

    /// Category chosen by the classifier.
    pub category: MessageCategory,

    /// Transcript of the run, in order.
    pub messages: Vec<TranscriptEntry>,

    /// Provider result.
    pub result: NotificationResult,
}

impl NotificationEnvelope {
    /// Creates an envelope with a fresh id.
    pub fn new(
        flight_code: impl Into<String>,
        category: MessageCategory,
        messages: Vec<TranscriptEntry>,
        result: NotificationResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            flight_code: flight_code.into(),
            category,
            messages,
            result,
        }
    }

    /// Content of the last transcript entry.
    pub fn final_message(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_result() -> NotificationResult {
        NotificationResult::new("+15550100", "Flight RJA3813 is on track.", "SM123", DispatchStatus::Sent)
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_value(MessageCategory::OnTrack).unwrap(), json!("on_track"));
        assert_eq!(MessageCategory::Delay.to_string(), "delay");
    }

    #[test]
    fn test_result_is_sent() {
        let mut result = sample_result();
        assert!(result.is_sent());

        result.status = DispatchStatus::Failed;
        assert!(!result.is_sent());
    }

    #[test]
    fn test_envelope_final_message() {
        let envelope = NotificationEnvelope::new(
            "RJA3813",
            MessageCategory::OnTrack,
            vec![
                TranscriptEntry::new(TranscriptRole::User, "request", "RJA3813 -> +15550100"),
                TranscriptEntry::new(TranscriptRole::Assistant, "format", "Flight RJA3813 is on track."),
                TranscriptEntry::new(TranscriptRole::Tool, "dispatch_sms", "sent SM123"),
            ],
            sample_result(),
        );

        assert_eq!(envelope.final_message(), Some("sent SM123"));
    }

    #[test]
    fn test_envelope_empty_transcript() {
        let envelope =
            NotificationEnvelope::new("RJA3813", MessageCategory::Landing, Vec::new(), sample_result());
        assert!(envelope.final_message().is_none());
    }

    #[test]
    fn test_envelope_json_shape() {
        let envelope =
            NotificationEnvelope::new("RJA3813", MessageCategory::Delay, Vec::new(), sample_result());
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["category"], json!("delay"));
        assert_eq!(value["result"]["status"], json!("sent"));
        assert_eq!(value["result"]["provider_message_id"], json!("SM123"));
    }
}
