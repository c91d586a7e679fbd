//! Handler for counted link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::domain::counter_event::{CounterEvent, enqueue};
use crate::error::AppError;
use crate::state::AppState;

/// Sends the visitor to a link's destination and counts the click.
///
/// # Endpoint
///
/// `GET /link-click/{id}`
///
/// # Request Flow
///
/// 1. Parse the link id; anything that is not a UUID is a plain 404
/// 2. Load the link; inactive links are treated as missing
/// 3. Queue a click event for the background worker
/// 4. Return 302 Found with the stored destination
///
/// The click is counted asynchronously. A full queue drops the event and
/// the redirect still succeeds.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist or is inactive.
pub async fn link_click_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link_id = Uuid::parse_str(&id)
        .map_err(|_| AppError::not_found("Link not found", json!({ "id": id })))?;

    let link = state.link_service.click_target(link_id).await?;

    enqueue(&state.counter_sender, CounterEvent::LinkClick { link_id });

    let location = HeaderValue::from_str(&link.url).map_err(|_| {
        tracing::error!(%link_id, "Stored link URL is not a valid header value");
        AppError::internal("Invalid link destination", json!({}))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
