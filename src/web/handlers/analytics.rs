//! Analytics page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, response::Response};

use super::pages::render_section;
use crate::domain::entities::{AnalyticsOverview, AuthUser, DailyViews, LinkClicks};
use crate::error::AppError;
use crate::state::AppState;

/// Template for the analytics page.
#[derive(Template, WebTemplate)]
#[template(path = "analytics.html")]
pub struct AnalyticsTemplate {
    pub total_views: i64,
    pub total_clicks: i64,
    pub total_links: usize,
    pub max_days: i64,
    pub daily: Vec<DailyViews>,
    pub top_links: Vec<LinkClicks>,
}

impl From<AnalyticsOverview> for AnalyticsTemplate {
    fn from(o: AnalyticsOverview) -> Self {
        Self {
            total_views: o.total_views,
            total_clicks: o.total_clicks,
            total_links: o.total_links,
            max_days: AnalyticsOverview::MAX_DAYS,
            daily: o.daily,
            top_links: o.top_links,
        }
    }
}

/// Renders daily views and per-link clicks.
///
/// # Endpoint
///
/// `GET /dashboard/analytics`
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    render_section("analytics", load(&state, &user).await)
}

async fn load(state: &AppState, user: &AuthUser) -> Result<Option<AnalyticsTemplate>, AppError> {
    let Some(page) = state.profile_service.get_page(user.id).await? else {
        return Ok(None);
    };

    let overview = state.analytics_service.overview(page.id).await?;

    Ok(Some(overview.into()))
}
