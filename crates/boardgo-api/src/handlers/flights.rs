//! Flight status handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use boardgo_agent::NotificationPreview;
use boardgo_core::normalize_flight_code;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// GET {prefix}/flights/:flight_code/status - Preview the notification for a flight.
pub async fn flight_status(
    State(state): State<AppState>,
    Path(flight_code): Path<String>,
) -> Result<Json<NotificationPreview>> {
    let code = normalize_flight_code(&flight_code)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid flight code: {:?}", flight_code)))?;

    let preview = state.agent()?.preview(&code).await?;
    info!(flight_code = %code, category = %preview.category, "Served flight preview");
    Ok(Json(preview))
}
