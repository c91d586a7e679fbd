//! DTOs for checkout and payment webhooks.

use serde::Serialize;

use crate::domain::entities::CheckoutSession;

/// Response of `POST /api/create-checkout-session`.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// Hosted checkout page to redirect the browser to.
    pub url: Option<String>,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(s: CheckoutSession) -> Self {
        Self {
            session_id: s.id,
            url: s.url,
        }
    }
}

/// Acknowledgement body for webhook deliveries.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}
