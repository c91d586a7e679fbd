//! API route configuration.
//!
//! Account endpoints require a session via [`crate::api::middleware::auth`];
//! webhook endpoints authenticate each delivery by signature instead.

use crate::api::handlers::{
    analytics_handler, create_checkout_handler, create_link_handler, delete_link_handler,
    get_page_handler, list_links_handler, me_handler, reorder_links_handler,
    set_link_active_handler, stripe_webhook_handler, update_link_handler, update_profile_handler,
    upsert_page_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post, put},
};

/// Account routes, protected by Bearer token or session cookie.
///
/// # Endpoints
///
/// - `GET    /me`                      - Session user with profile and page
/// - `PUT    /profile`                 - Save display name
/// - `GET    /page`                    - The caller's page
/// - `PUT    /page`                    - Create or update the caller's page
/// - `GET    /links`                   - List links in display order
/// - `POST   /links`                   - Add a link
/// - `PUT    /links/order`             - Reorder links
/// - `PATCH  /links/{id}`              - Partially update a link
/// - `DELETE /links/{id}`              - Delete a link
/// - `PUT    /links/{id}/active`       - Show or hide a link
/// - `GET    /analytics`               - Views and clicks overview
/// - `POST   /create-checkout-session` - Start a premium subscription checkout
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route("/profile", put(update_profile_handler))
        .route("/page", get(get_page_handler).put(upsert_page_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/order", put(reorder_links_handler))
        .route(
            "/links/{id}",
            patch(update_link_handler).delete(delete_link_handler),
        )
        .route("/links/{id}/active", put(set_link_active_handler))
        .route("/analytics", get(analytics_handler))
        .route("/create-checkout-session", post(create_checkout_handler))
}

/// Payment provider callbacks. No session; the signature is checked by the
/// handler.
///
/// # Endpoints
///
/// - `POST /webhooks/stripe` - Subscription lifecycle events
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhooks/stripe", post(stripe_webhook_handler))
}
