//! Handler for the caller's analytics.

use axum::{Extension, Json, extract::State};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns daily views for the last 30 recorded days and click totals for
/// every link of the caller's page.
///
/// # Endpoint
///
/// `GET /api/analytics`
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no page yet.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let page = state.profile_service.require_page(user.id).await?;
    let overview = state.analytics_service.overview(page.id).await?;

    Ok(Json(overview.into()))
}
