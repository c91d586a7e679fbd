//! Billing entities linking payment-provider customers to profiles.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Persisted mapping from a payment-provider customer to a profile.
///
/// Written when a checkout session is created so that later subscription
/// events, which only carry the customer id, can find the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingCustomer {
    pub customer_id: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Checkout session handle returned to the browser for redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}
