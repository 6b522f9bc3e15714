//! Optional language-model rewording of notification text.
//!
//! The classifier has already decided what kind of message to send; the
//! polisher may only reword it. Model output that drops the flight code or
//! the delay, or that is too long for an SMS, is rejected and the template
//! text is used instead.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use boardgo_core::Settings;
use boardgo_models::{FlightStatusRecord, MessageCategory};

use crate::client::{ChatMessage, OpenRouterClient};
use crate::config::ModelConfig;
use crate::error::{AgentError, Result};

/// Longest polished text accepted (two SMS segments).
pub const MAX_SMS_CHARS: usize = 320;

/// System prompt for the polisher.
const SYSTEM_PROMPT: &str = r#"You rewrite flight status notifications as friendly SMS text.

Rules:
- Keep every fact: flight number, status, times, terminal, gate and delay minutes
- Do not add facts that are not in the draft
- At most 300 characters, plain text, no emoji, no markdown
- Reply with the SMS text only"#;

/// Rewords a drafted notification.
#[async_trait]
pub trait MessagePolisher: Send + Sync {
    /// Return a reworded version of `draft`.
    async fn polish(
        &self,
        category: MessageCategory,
        record: &FlightStatusRecord,
        draft: &str,
    ) -> Result<String>;
}

/// Polisher backed by an OpenRouter chat model.
pub struct LlmPolisher {
    client: OpenRouterClient,
    config: ModelConfig,
}

impl LlmPolisher {
    pub fn new(client: OpenRouterClient, config: ModelConfig) -> Self {
        Self { client, config }
    }

    /// Build a polisher from settings, or `None` when no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Option<Arc<dyn MessagePolisher>>> {
        let Some(api_key) = settings.llm.api_key.as_deref() else {
            return Ok(None);
        };
        let client = OpenRouterClient::new(api_key, settings.api_timeout)?;
        let polisher: Arc<dyn MessagePolisher> =
            Arc::new(Self::new(client, ModelConfig::new(&settings.llm.model)));
        Ok(Some(polisher))
    }
}

#[async_trait]
impl MessagePolisher for LlmPolisher {
    async fn polish(
        &self,
        category: MessageCategory,
        record: &FlightStatusRecord,
        draft: &str,
    ) -> Result<String> {
        let user_prompt = format!(
            "Notification type: {}\nFlight: {}\n\nDraft:\n{}\n\nRewrite the draft:",
            category, record.flight_code, draft
        );

        let response = self
            .client
            .chat(
                &self.config,
                vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user_prompt)],
            )
            .await?;

        response
            .content()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| AgentError::ResponseParse("No content in response".to_string()))
    }
}

/// Checks model output against the facts the template guarantees.
///
/// Returns the trimmed candidate when it is acceptable.
pub fn accept_polished(
    candidate: &str,
    category: MessageCategory,
    record: &FlightStatusRecord,
) -> Option<String> {
    let text = candidate.trim();
    if text.is_empty() || text.chars().count() > MAX_SMS_CHARS {
        return None;
    }
    if !text
        .to_uppercase()
        .contains(&record.flight_code.to_uppercase())
    {
        return None;
    }
    if category == MessageCategory::Delay {
        if let Some(minutes) = record.delay_minutes.filter(|m| *m > 0) {
            if !mentions_minutes(text, &record.flight_code, minutes) {
                return None;
            }
        }
    }
    Some(text.to_string())
}

/// True when `minutes` appears as a standalone number in `text`.
///
/// The flight code is removed first, and numbers that are part of a time
/// (`08:38`) or a date (`2025-01-38`) do not count.
fn mentions_minutes(text: &str, flight_code: &str, minutes: i64) -> bool {
    let without_code = text
        .to_uppercase()
        .replace(&flight_code.to_uppercase(), " ");
    let pattern = format!(r"(?:^|[^0-9:/\-]){}(?:[^0-9:]|$)", minutes);
    Regex::new(&pattern).is_ok_and(|re| re.is_match(&without_code))
}

/// Runs `polisher` on `draft`, falling back to the draft on any problem.
///
/// Returns the text to send and whether the polished version was used.
pub async fn polish_or_fallback(
    polisher: &dyn MessagePolisher,
    category: MessageCategory,
    record: &FlightStatusRecord,
    draft: &str,
) -> (String, bool) {
    match polisher.polish(category, record, draft).await {
        Ok(candidate) => match accept_polished(&candidate, category, record) {
            Some(text) => {
                debug!(flight_code = %record.flight_code, "Using polished message");
                (text, true)
            }
            None => {
                warn!(
                    flight_code = %record.flight_code,
                    candidate = %candidate,
                    "Polished message rejected, using template"
                );
                (draft.to_string(), false)
            }
        },
        Err(e) => {
            warn!(flight_code = %record.flight_code, error = %e, "Polishing failed, using template");
            (draft.to_string(), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPolisher(Option<&'static str>);

    #[async_trait]
    impl MessagePolisher for FixedPolisher {
        async fn polish(
            &self,
            _category: MessageCategory,
            _record: &FlightStatusRecord,
            _draft: &str,
        ) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| AgentError::ModelInvocation("boom".into()))
        }
    }

    fn delayed() -> FlightStatusRecord {
        FlightStatusRecord::new("RJA3813", "delayed").with_delay(45)
    }

    #[test]
    fn test_accept_polished_valid() {
        let text = accept_polished(
            "  Heads up: RJA3813 is running 45 minutes late.  ",
            MessageCategory::Delay,
            &delayed(),
        );
        assert_eq!(text.as_deref(), Some("Heads up: RJA3813 is running 45 minutes late."));
    }

    #[test]
    fn test_accept_polished_requires_flight_code() {
        assert!(accept_polished("Your flight is 45 minutes late.", MessageCategory::Delay, &delayed()).is_none());
    }

    #[test]
    fn test_accept_polished_requires_delay_minutes() {
        assert!(accept_polished("RJA3813 is running late.", MessageCategory::Delay, &delayed()).is_none());
    }

    #[test]
    fn test_accept_polished_ignores_digits_in_flight_code() {
        let record = FlightStatusRecord::new("RJA3813", "delayed").with_delay(38);
        assert!(accept_polished("RJA3813 is running late.", MessageCategory::Delay, &record).is_none());
        assert_eq!(
            accept_polished("RJA3813 is 38 minutes late.", MessageCategory::Delay, &record).as_deref(),
            Some("RJA3813 is 38 minutes late.")
        );
        assert!(accept_polished("Expect a 38-minute delay on RJA3813.", MessageCategory::Delay, &record).is_some());
    }

    #[test]
    fn test_accept_polished_ignores_times_and_dates() {
        let record = FlightStatusRecord::new("RJA3813", "delayed").with_delay(38);
        assert!(accept_polished(
            "RJA3813 now leaves 2025-01-10 08:38 UTC.",
            MessageCategory::Delay,
            &record
        )
        .is_none());

        let record = FlightStatusRecord::new("CA908", "delayed").with_delay(10);
        assert!(accept_polished("CA908 departs 2025-01-10, running late.", MessageCategory::Delay, &record).is_none());
    }

    #[test]
    fn test_accept_polished_rejects_empty_and_long() {
        assert!(accept_polished("   ", MessageCategory::OnTrack, &delayed()).is_none());

        let long = format!("RJA3813 {}", "x".repeat(MAX_SMS_CHARS));
        assert!(accept_polished(&long, MessageCategory::OnTrack, &delayed()).is_none());
    }

    #[test]
    fn test_accept_polished_case_insensitive_code() {
        let record = FlightStatusRecord::new("CA908", "en route");
        assert!(accept_polished("ca908 is on its way.", MessageCategory::OnTrack, &record).is_some());
    }

    #[tokio::test]
    async fn test_polish_or_fallback_uses_valid_output() {
        let polisher = FixedPolisher(Some("RJA3813 now 45 min late."));
        let (text, polished) =
            polish_or_fallback(&polisher, MessageCategory::Delay, &delayed(), "draft").await;
        assert_eq!(text, "RJA3813 now 45 min late.");
        assert!(polished);
    }

    #[tokio::test]
    async fn test_polish_or_fallback_on_error() {
        let polisher = FixedPolisher(None);
        let (text, polished) =
            polish_or_fallback(&polisher, MessageCategory::Delay, &delayed(), "draft").await;
        assert_eq!(text, "draft");
        assert!(!polished);
    }

    #[tokio::test]
    async fn test_polish_or_fallback_on_invalid_output() {
        let polisher = FixedPolisher(Some("Your flight is late."));
        let (text, polished) =
            polish_or_fallback(&polisher, MessageCategory::Delay, &delayed(), "draft").await;
        assert_eq!(text, "draft");
        assert!(!polished);
    }

    #[test]
    fn test_from_settings_without_key() {
        let settings = Settings::default();
        assert!(LlmPolisher::from_settings(&settings).unwrap().is_none());
    }
}
