//! Web route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    analytics_handler, dashboard_handler, demo_handler, landing_handler, links_handler,
    profile_handler, public_page_handler,
};
use axum::{Router, routing::get};

/// Dashboard routes, mounted under `/dashboard`.
///
/// Protected via [`crate::web::middleware::web_auth`] (session cookie).
///
/// # Endpoints
///
/// - `GET /` - Overview with totals and the public address
/// - `GET /links` - Link management page
/// - `GET /profile` - Profile and page settings
/// - `GET /analytics` - Daily views and link clicks
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/links", get(links_handler))
        .route("/profile", get(profile_handler))
        .route("/analytics", get(analytics_handler))
}

/// Public pages.
///
/// # Endpoints
///
/// - `GET /` - Landing page
/// - `GET /demo` - Sample bio page
/// - `GET /{username}` - Rendered bio page
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_handler))
        .route("/demo", get(demo_handler))
        .route("/{username}", get(public_page_handler))
}
