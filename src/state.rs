//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{
    AnalyticsService, AuthService, BillingService, LinkService, ProfileService,
};
use crate::domain::counter_event::CounterEvent;

/// Browser-facing settings used by the dashboard and the session gate.
#[derive(Debug, Clone)]
pub struct WebSettings {
    /// Where signed-out dashboard visitors are redirected.
    pub login_url: String,
    /// Name of the cookie carrying the access token.
    pub session_cookie: String,
    /// Public base URL, used to show the page address.
    pub site_url: String,
}

/// Cloned per request; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub profile_service: Arc<ProfileService>,
    pub link_service: Arc<LinkService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub billing_service: Arc<BillingService>,
    /// Producer side of the view/click counter queue.
    pub counter_sender: mpsc::Sender<CounterEvent>,
    pub web: Arc<WebSettings>,
}
