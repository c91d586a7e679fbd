//! Payment gateway abstraction used by the billing service.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::CheckoutSession;

/// Errors returned by a payment provider call.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Payment provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Payment provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected payment provider response: {0}")]
    InvalidResponse(String),
}

/// Outbound calls to the payment provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a provider customer tagged with the profile id.
    ///
    /// Returns the provider customer id (`cus_...`).
    async fn create_customer(&self, email: &str, user_id: Uuid) -> Result<String, GatewayError>;

    /// Creates a subscription checkout session for an existing customer.
    async fn create_checkout_session(
        &self,
        customer_id: &str,
        user_id: Uuid,
    ) -> Result<CheckoutSession, GatewayError>;
}
