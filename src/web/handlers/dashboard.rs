//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use super::pages::render_section;
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Query flags set by the checkout success and cancel URLs.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutReturn {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub canceled: bool,
}

/// Template for the dashboard home page.
///
/// Renders `templates/dashboard.html` with an overview of:
/// - Total views and clicks
/// - Number of links
/// - The public page address and premium status
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub display_name: String,
    pub username: String,
    pub public_url: String,
    pub total_views: i64,
    pub total_clicks: i64,
    pub total_links: usize,
    pub is_premium: bool,
    pub checkout: CheckoutReturn,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// Shows the onboarding call-to-action when the user has no page yet.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(checkout): Query<CheckoutReturn>,
) -> Response {
    render_section("dashboard", load(&state, &user, checkout).await)
}

async fn load(
    state: &AppState,
    user: &AuthUser,
    checkout: CheckoutReturn,
) -> Result<Option<DashboardTemplate>, AppError> {
    let Some(page) = state.profile_service.get_page(user.id).await? else {
        return Ok(None);
    };

    let (profile, overview) = tokio::try_join!(
        state.profile_service.get_profile(user.id),
        state.analytics_service.overview(page.id),
    )?;

    let display_name = profile
        .as_ref()
        .and_then(|p| p.full_name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "there".to_string());

    Ok(Some(DashboardTemplate {
        display_name,
        public_url: format!("{}/{}", state.web.site_url, page.username),
        username: page.username,
        total_views: overview.total_views,
        total_clicks: overview.total_clicks,
        total_links: overview.total_links,
        is_premium: profile.is_some_and(|p| p.is_premium),
        checkout,
    }))
}
