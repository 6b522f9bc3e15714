//! Twilio SMS client.
//!
//! Sends messages with `POST {api_url}/Accounts/{sid}/Messages.json` using
//! HTTP basic auth (account SID + auth token) and form-encoded `To`, `From`
//! and `Body` fields.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use boardgo_core::Settings;
use boardgo_models::{DispatchStatus, NotificationResult};

use crate::error::DispatchError;
use crate::http::{build_http_client, extract_error_message};
use crate::traits::{validate_recipient, SmsGateway};

/// Result type for SMS dispatch.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Provider statuses that already indicate a delivery failure.
const FAILED_STATUSES: &[&str] = &["failed", "undelivered"];

/// Twilio Messages API client.
#[derive(Clone)]
pub struct TwilioClient {
    client: reqwest::Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioClient {
    /// Create a new client.
    pub fn new(
        api_url: impl Into<String>,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = build_http_client(timeout)
            .map_err(|e| DispatchError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
        })
    }

    /// Create a client from settings.
    ///
    /// Requires `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and `TWILIO_FROM_NUMBER`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let creds = settings.twilio.require_credentials()?;
        Self::new(
            &settings.twilio.api_url,
            creds.account_sid,
            creds.auth_token,
            creds.from_number,
            settings.api_timeout,
        )
    }

    /// Messages endpoint for the configured account.
    pub fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.api_url.trim_end_matches('/'),
            self.account_sid
        )
    }

    /// Send an SMS.
    pub async fn send(&self, recipient_number: &str, body: &str) -> Result<NotificationResult> {
        let recipient = validate_recipient(recipient_number)?;

        info!(recipient = %recipient, chars = body.chars().count(), "Sending SMS");

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", recipient),
                ("From", self.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DispatchError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = extract_error_message(&text).unwrap_or(text);
            warn!(recipient = %recipient, status = status.as_u16(), error = %message, "SMS rejected");
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let message: TwilioMessage =
            serde_json::from_str(&text).map_err(|e| DispatchError::Parse(e.to_string()))?;
        debug!(sid = %message.sid, status = ?message.status, "SMS accepted");

        Ok(into_result(recipient, body, message))
    }
}

#[async_trait]
impl SmsGateway for TwilioClient {
    fn name(&self) -> &str {
        "twilio"
    }

    async fn send_sms(&self, recipient_number: &str, body: &str) -> Result<NotificationResult> {
        self.send(recipient_number, body).await
    }
}

/// Message resource returned by Twilio.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioMessage {
    /// Message SID (`SM...`).
    pub sid: String,

    /// Delivery status (`queued`, `sent`, `failed`, ...).
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,
}

/// Converts an accepted Twilio message into a [`NotificationResult`].
pub fn into_result(recipient: &str, body: &str, message: TwilioMessage) -> NotificationResult {
    let failed = message
        .status
        .as_deref()
        .is_some_and(|s| FAILED_STATUSES.contains(&s.to_lowercase().as_str()));

    let status = if failed {
        warn!(sid = %message.sid, error = ?message.error_message, "Provider reports delivery failure");
        DispatchStatus::Failed
    } else {
        DispatchStatus::Sent
    };

    NotificationResult::new(recipient, body, message.sid, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::stub::StubServer;

    fn client(api_url: &str) -> TwilioClient {
        TwilioClient::new(api_url, "AC123", "secret", "+15550000", Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_messages_url() {
        assert_eq!(
            client("https://api.twilio.com/2010-04-01/").messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    #[test]
    fn test_into_result_queued_is_sent() {
        let json = r#"{
            "sid": "SM0123456789abcdef",
            "status": "queued",
            "to": "+15550100",
            "body": "Flight RJA3813 is on track.",
            "error_code": null,
            "error_message": null
        }"#;
        let message: TwilioMessage = serde_json::from_str(json).unwrap();
        let result = into_result("+15550100", "Flight RJA3813 is on track.", message);

        assert_eq!(result.provider_message_id, "SM0123456789abcdef");
        assert_eq!(result.status, DispatchStatus::Sent);
        assert_eq!(result.recipient_number, "+15550100");
    }

    #[test]
    fn test_into_result_failed_status() {
        let json = r#"{"sid": "SM1", "status": "undelivered", "error_message": "carrier"}"#;
        let message: TwilioMessage = serde_json::from_str(json).unwrap();
        let result = into_result("+15550100", "hi", message);
        assert_eq!(result.status, DispatchStatus::Failed);
    }

    #[tokio::test]
    async fn test_send_rejects_empty_recipient_without_request() {
        let err = client("http://127.0.0.1:9").send("   ", "hello").await.unwrap_err();
        assert!(matches!(err, DispatchError::EmptyRecipient));
    }

    async fn stub_client(status: StatusCode, body: &'static str) -> (StubServer, TwilioClient) {
        let stub = StubServer::start(status, body).await;
        let client = client(&format!("{}/2010-04-01", stub.base_url));
        (stub, client)
    }

    #[tokio::test]
    async fn test_send_posts_form_with_basic_auth() {
        let (stub, client) =
            stub_client(StatusCode::CREATED, r#"{"sid": "SM1", "status": "queued"}"#).await;

        let result = client
            .send(" +15550100 ", "Flight RJA3813 has landed.")
            .await
            .unwrap();
        assert_eq!(result.provider_message_id, "SM1");
        assert_eq!(result.status, DispatchStatus::Sent);
        assert_eq!(result.recipient_number, "+15550100");

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, axum::http::Method::POST);
        assert_eq!(requests[0].path, "/2010-04-01/Accounts/AC123/Messages.json");
        assert_eq!(requests[0].fields.get("To").map(String::as_str), Some("+15550100"));
        assert_eq!(requests[0].fields.get("From").map(String::as_str), Some("+15550000"));
        assert_eq!(
            requests[0].fields.get("Body").map(String::as_str),
            Some("Flight RJA3813 has landed.")
        );
        assert!(requests[0]
            .authorization
            .as_deref()
            .is_some_and(|v| v.starts_with("Basic ")));
    }

    #[tokio::test]
    async fn test_send_non_success_is_rejected_with_body_message() {
        let (_stub, client) = stub_client(
            StatusCode::BAD_REQUEST,
            r#"{"code": 21211, "message": "The 'To' number is not a valid phone number.", "status": 400}"#,
        )
        .await;

        let err = client.send("12", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Rejected { status: 400, ref message }
                if message == "The 'To' number is not a valid phone number."
        ));
    }

    #[tokio::test]
    async fn test_send_unparsable_success_is_parse_error() {
        let (_stub, client) = stub_client(StatusCode::CREATED, "accepted").await;
        let err = client.send("+15550100", "hello").await.unwrap_err();
        assert!(matches!(err, DispatchError::Parse(_)));
    }

    #[test]
    fn test_from_settings_requires_credentials() {
        let settings = Settings::default();
        let err = TwilioClient::from_settings(&settings).err().unwrap();
        assert!(matches!(err, DispatchError::Configuration(_)));
    }
}
