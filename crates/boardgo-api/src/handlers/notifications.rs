//! Notification handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use boardgo_core::normalize_flight_code;
use boardgo_models::NotificationEnvelope;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::CreateNotificationRequest;

/// POST {prefix}/notifications - Look up a flight and text the recipient.
pub async fn create_notification(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NotificationEnvelope>)> {
    let Json(req) = payload?;
    let raw_code = req
        .flight_code
        .ok_or_else(|| ApiError::BadRequest("flight_code is required".to_string()))?;
    let code = normalize_flight_code(&raw_code)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid flight code: {:?}", raw_code)))?;

    let recipient = req
        .recipient_number
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::BadRequest("recipient_number is required".to_string()))?;

    let envelope = state
        .agent()?
        .send_notification_for_flight(&code, recipient)
        .await?;

    Ok((StatusCode::CREATED, Json(envelope)))
}
