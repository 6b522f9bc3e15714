//! Shared HTTP helpers for provider clients.

use std::time::Duration;

/// Build a reqwest client with the configured request timeout.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Pull a human-readable message out of a provider error body.
///
/// Understands `{"message": ..}` (Twilio) and `{"error": {"message": ..}}`
/// (aviationstack, OpenRouter). Returns `None` for anything else.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json["message"]
        .as_str()
        .or_else(|| json["error"]["message"].as_str())
        .or_else(|| json["error"].as_str())
        .map(|s| s.to_string())
}
