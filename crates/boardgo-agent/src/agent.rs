//! Notification agent.
//!
//! Runs the single-pass notification pipeline:
//!
//! ```text
//! fetch status -> classify -> format -> (polish) -> send SMS
//! ```
//!
//! Every step is recorded in the envelope transcript. Failures are returned
//! as they happened: a lookup failure stops the run before anything is sent,
//! and a dispatch failure carries the message that could not be delivered.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use boardgo_core::{classify, format_message, Settings};
use boardgo_models::{
    FlightStatusRecord, MessageCategory, NotificationEnvelope, TranscriptEntry, TranscriptRole,
};
use boardgo_providers::{
    validate_recipient, AviationStackClient, DispatchError, FlightLookupError,
    FlightStatusSource, SmsGateway, TwilioClient,
};

use crate::error::{AgentError, Result};
use crate::polisher::{polish_or_fallback, LlmPolisher, MessagePolisher};

/// What would be sent for a flight, without sending it.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationPreview {
    /// Fetched flight record.
    pub record: FlightStatusRecord,
    /// Category chosen by the classifier.
    pub category: MessageCategory,
    /// Text that would be sent.
    pub message: String,
    /// Whether the language model reworded the template.
    pub polished: bool,
}

/// Agent that turns a flight code into an SMS notification.
#[derive(Clone)]
pub struct NotificationAgent {
    source: Arc<dyn FlightStatusSource>,
    /// SMS gateway, or why none could be built. Previews work either way.
    gateway: std::result::Result<Arc<dyn SmsGateway>, String>,
    polisher: Option<Arc<dyn MessagePolisher>>,
}

impl NotificationAgent {
    /// Create an agent from a flight data source and an SMS gateway.
    pub fn new(source: Arc<dyn FlightStatusSource>, gateway: Arc<dyn SmsGateway>) -> Self {
        Self {
            source,
            gateway: Ok(gateway),
            polisher: None,
        }
    }

    /// Create an agent that can preview but not send.
    ///
    /// Sending fails with [`AgentError::Configuration`] carrying `reason`.
    pub fn preview_only(source: Arc<dyn FlightStatusSource>, reason: impl Into<String>) -> Self {
        Self {
            source,
            gateway: Err(reason.into()),
            polisher: None,
        }
    }

    /// Attach a message polisher.
    pub fn with_polisher(mut self, polisher: Arc<dyn MessagePolisher>) -> Self {
        self.polisher = Some(polisher);
        self
    }

    /// Build the production agent (aviationstack + Twilio) from settings.
    ///
    /// Only the aviationstack key is required. Without Twilio credentials the
    /// agent still previews; sending reports the missing variable. The
    /// polisher is attached only when `polish` is set and an OpenRouter key
    /// is configured.
    pub fn from_settings(settings: &Settings, polish: bool) -> Result<Self> {
        let source: Arc<dyn FlightStatusSource> = Arc::new(
            AviationStackClient::from_settings(settings).map_err(|e| match e {
                FlightLookupError::Configuration(msg) => AgentError::Configuration(msg),
                other => AgentError::Configuration(other.to_string()),
            })?,
        );

        let mut agent = match TwilioClient::from_settings(settings) {
            Ok(gateway) => Self::new(source, Arc::new(gateway)),
            Err(e) => {
                let reason = match e {
                    DispatchError::Configuration(msg) => msg,
                    other => other.to_string(),
                };
                warn!(reason = %reason, "SMS gateway not configured, previews only");
                Self::preview_only(source, reason)
            }
        };
        if polish {
            if let Some(polisher) = LlmPolisher::from_settings(settings)? {
                info!(model = %settings.llm.model, "Message polishing enabled");
                agent = agent.with_polisher(polisher);
            }
        }
        Ok(agent)
    }

    /// True when an SMS gateway is configured.
    pub fn can_send(&self) -> bool {
        self.gateway.is_ok()
    }

    /// True when a polisher is attached.
    pub fn polishing_enabled(&self) -> bool {
        self.polisher.is_some()
    }

    /// Fetch, classify and format without sending anything.
    pub async fn preview(&self, flight_code: &str) -> Result<NotificationPreview> {
        let mut transcript = Vec::new();
        self.draft(flight_code, &mut transcript).await
    }

    /// Look up `flight_code` and send the resulting notification to
    /// `recipient_number`.
    pub async fn send_notification_for_flight(
        &self,
        flight_code: &str,
        recipient_number: &str,
    ) -> Result<NotificationEnvelope> {
        let gateway = self
            .gateway
            .as_ref()
            .map_err(|reason| AgentError::Configuration(reason.clone()))?;
        let recipient = validate_recipient(recipient_number).map_err(|source| {
            error!(flight_code = %flight_code, error = %source, "Invalid recipient");
            AgentError::Dispatch {
                message: String::new(),
                source,
            }
        })?;

        info!(
            flight_code = %flight_code,
            source = self.source.name(),
            gateway = gateway.name(),
            "Starting notification run"
        );

        let mut transcript = vec![TranscriptEntry::new(
            TranscriptRole::User,
            "request",
            format!("Notify {} about flight {}", recipient, flight_code),
        )];

        let draft = self.draft(flight_code, &mut transcript).await?;

        let result = match gateway.send_sms(recipient, &draft.message).await {
            Ok(result) => result,
            Err(source) => {
                error!(
                    flight_code = %draft.record.flight_code,
                    category = %draft.category,
                    message = %draft.message,
                    error = %source,
                    "SMS dispatch failed"
                );
                return Err(AgentError::Dispatch {
                    message: draft.message,
                    source,
                });
            }
        };

        let status = if result.is_sent() { "sent" } else { "failed" };
        transcript.push(TranscriptEntry::new(
            TranscriptRole::Tool,
            "dispatch_sms",
            format!(
                "{} {} to {}",
                status, result.provider_message_id, result.recipient_number
            ),
        ));
        transcript.push(TranscriptEntry::new(
            TranscriptRole::Assistant,
            "result",
            result.message_body.clone(),
        ));

        info!(
            flight_code = %draft.record.flight_code,
            category = %draft.category,
            provider_message_id = %result.provider_message_id,
            "Notification sent"
        );

        Ok(NotificationEnvelope::new(
            draft.record.flight_code,
            draft.category,
            transcript,
            result,
        ))
    }

    async fn draft(
        &self,
        flight_code: &str,
        transcript: &mut Vec<TranscriptEntry>,
    ) -> Result<NotificationPreview> {
        let record = self.source.fetch_status(flight_code).await.map_err(|e| {
            error!(flight_code = %flight_code, error = %e, "Flight lookup failed");
            AgentError::Lookup(e)
        })?;
        transcript.push(TranscriptEntry::new(
            TranscriptRole::Tool,
            "fetch_flight_status",
            describe_record(&record),
        ));

        let category = classify(&record);
        transcript.push(TranscriptEntry::new(
            TranscriptRole::Assistant,
            "classify",
            category.as_str(),
        ));

        let template = format_message(category, &record);
        transcript.push(TranscriptEntry::new(
            TranscriptRole::Assistant,
            "format",
            template.clone(),
        ));

        let (message, polished) = match &self.polisher {
            Some(polisher) => {
                polish_or_fallback(polisher.as_ref(), category, &record, &template).await
            }
            None => (template, false),
        };
        if polished {
            transcript.push(TranscriptEntry::new(
                TranscriptRole::Assistant,
                "polish",
                message.clone(),
            ));
        }

        Ok(NotificationPreview {
            record,
            category,
            message,
            polished,
        })
    }
}

/// One-line summary of a record for the transcript.
fn describe_record(record: &FlightStatusRecord) -> String {
    let mut parts = vec![format!("{} status={}", record.flight_code, record.status)];
    if let Some(minutes) = record.delay_minutes {
        parts.push(format!("delay={}", minutes));
    }
    if let Some(terminal) = &record.terminal {
        parts.push(format!("terminal={}", terminal));
    }
    if let Some(gate) = &record.gate {
        parts.push(format!("gate={}", gate));
    }
    parts.join(" ")
}
