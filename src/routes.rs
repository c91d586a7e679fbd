//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`                 - Landing page
//! - `GET  /demo`             - Sample bio page
//! - `GET  /{username}`       - Public bio page
//! - `GET  /link-click/{id}`  - Counted link redirect (public)
//! - `GET  /health`           - Health check: DB, counter queue (public)
//! - `/api/*`                 - JSON API (Bearer token or session cookie)
//! - `POST /api/webhooks/stripe` - Payment webhooks (signed, no session)
//! - `/dashboard/*`           - Web UI (session cookie required)
//! - `/static/*`              - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, relaxed for public routes
//! - **Authentication** - 401 for the API, redirect to login for the dashboard
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, link_click_handler};
use crate::api::middleware::rate_limit::{self, PUBLIC, RateLimit, STRICT};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds every route with the given rate limit mode.
///
/// Paths are matched as-is; [`app_router`] adds trailing slash handling.
pub fn build_router(state: AppState, limit: RateLimit) -> Router {
    let api_router = rate_limit::apply(
        api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        STRICT,
        limit,
    )
    .merge(rate_limit::apply(api::routes::webhook_routes(), PUBLIC, limit));

    let dashboard = rate_limit::apply(
        web::routes::protected_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        )),
        STRICT,
        limit,
    );

    let public = rate_limit::apply(
        web::routes::public_routes()
            .route("/link-click/{id}", get(link_click_handler))
            .route("/health", get(health_handler)),
        PUBLIC,
        limit,
    );

    Router::new()
        .merge(public)
        .nest("/api", api_router)
        .nest("/dashboard", dashboard)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash()
        .layer(build_router(state, RateLimit::PerIp { behind_proxy }))
}
