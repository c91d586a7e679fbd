//! Premium checkout and payment webhook handling.

use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{AuthUser, CheckoutSession};
use crate::domain::repositories::{BillingRepository, ProfileRepository};
use crate::error::AppError;
use crate::infrastructure::payments::{GatewayError, PaymentGateway, verify_signature};

const EVENT_CHECKOUT_COMPLETED: &str = "checkout.session.completed";
const EVENT_SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";

/// Result of processing one webhook event. Every variant is acknowledged
/// with 200 so the provider stops retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    PremiumGranted { user_id: Uuid },
    PremiumRevoked { user_id: Uuid },
    Ignored { event_type: String },
}

#[derive(Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Deserialize)]
struct EventData {
    object: serde_json::Value,
}

#[derive(Deserialize)]
struct CompletedSession {
    customer: Option<String>,
    client_reference_id: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

#[derive(Deserialize)]
struct DeletedSubscription {
    customer: Option<String>,
}

/// Webhook verification settings.
#[derive(Debug, Clone)]
pub struct WebhookSettings {
    pub secret: String,
    pub tolerance_secs: i64,
}

/// Bridges the payment provider and the premium flag.
pub struct BillingService {
    profiles: Arc<dyn ProfileRepository>,
    customers: Arc<dyn BillingRepository>,
    gateway: Arc<dyn PaymentGateway>,
    webhook: WebhookSettings,
}

fn gateway_failure(action: &'static str, user_id: Uuid, e: GatewayError) -> AppError {
    tracing::error!(error = %e, user_id = %user_id, action, "Payment provider call failed");
    AppError::internal("Payment provider error", json!({ "action": action }))
}

impl BillingService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        customers: Arc<dyn BillingRepository>,
        gateway: Arc<dyn PaymentGateway>,
        webhook: WebhookSettings,
    ) -> Self {
        Self {
            profiles,
            customers,
            gateway,
            webhook,
        }
    }

    /// Stores the customer mapping and returns the customer id to bill.
    ///
    /// A concurrent checkout by the same user may have stored its own customer
    /// first; that mapping wins and the new customer is left unused.
    async fn persist_customer(
        &self,
        customer_id: &str,
        user_id: Uuid,
    ) -> Result<String, AppError> {
        match self.customers.save(customer_id, user_id).await {
            Ok(saved) => Ok(saved.customer_id),
            Err(AppError::Conflict { message, details }) => {
                match self.customers.find_by_user(user_id).await? {
                    Some(existing) => {
                        tracing::warn!(
                            user_id = %user_id,
                            unused_customer_id = %customer_id,
                            customer_id = %existing.customer_id,
                            "Customer created concurrently, reusing stored mapping"
                        );
                        Ok(existing.customer_id)
                    }
                    None => Err(AppError::Conflict { message, details }),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Starts a premium subscription checkout for the signed-in user.
    ///
    /// The provider customer is reused when one is already mapped to the
    /// user; a new one is stored before the session is created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the profile has no email.
    /// Returns [`AppError::Internal`] if the provider call fails.
    pub async fn create_checkout(&self, user: &AuthUser) -> Result<CheckoutSession, AppError> {
        let email = self
            .profiles
            .find_by_id(user.id)
            .await?
            .and_then(|p| p.email)
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                AppError::bad_request("User email not found", json!({ "user_id": user.id }))
            })?;

        let customer_id = match self.customers.find_by_user(user.id).await? {
            Some(existing) => existing.customer_id,
            None => {
                let customer_id = self
                    .gateway
                    .create_customer(&email, user.id)
                    .await
                    .map_err(|e| gateway_failure("create_customer", user.id, e))?;
                self.persist_customer(&customer_id, user.id).await?
            }
        };

        let session = self
            .gateway
            .create_checkout_session(&customer_id, user.id)
            .await
            .map_err(|e| gateway_failure("create_checkout_session", user.id, e))?;

        tracing::info!(
            user_id = %user.id,
            customer_id = %customer_id,
            session_id = %session.id,
            "Checkout session created"
        );

        Ok(session)
    }

    /// Verifies and applies one webhook delivery.
    ///
    /// `now` is the current Unix time in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a missing or invalid signature
    /// and for an unparseable payload; nothing is modified in that case.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
        now: i64,
    ) -> Result<WebhookOutcome, AppError> {
        let signature = signature.ok_or_else(|| {
            AppError::bad_request("Invalid signature", json!({ "reason": "Missing header" }))
        })?;

        verify_signature(
            payload,
            signature,
            &self.webhook.secret,
            self.webhook.tolerance_secs,
            now,
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Webhook signature verification failed");
            AppError::bad_request("Invalid signature", json!({ "reason": e.to_string() }))
        })?;

        let event: WebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            AppError::bad_request("Invalid webhook payload", json!({ "reason": e.to_string() }))
        })?;

        match event.event_type.as_str() {
            EVENT_CHECKOUT_COMPLETED => {
                let session: CompletedSession = serde_json::from_value(event.data.object)
                    .map_err(|e| {
                        AppError::bad_request(
                            "Invalid checkout session",
                            json!({ "reason": e.to_string() }),
                        )
                    })?;
                self.checkout_completed(session, event.event_type).await
            }
            EVENT_SUBSCRIPTION_DELETED => {
                let subscription: DeletedSubscription = serde_json::from_value(event.data.object)
                    .map_err(|e| {
                        AppError::bad_request(
                            "Invalid subscription",
                            json!({ "reason": e.to_string() }),
                        )
                    })?;
                self.subscription_deleted(subscription, event.event_type)
                    .await
            }
            _ => {
                tracing::info!(event_type = %event.event_type, "Unhandled webhook event");
                Ok(WebhookOutcome::Ignored {
                    event_type: event.event_type,
                })
            }
        }
    }

    async fn checkout_completed(
        &self,
        session: CompletedSession,
        event_type: String,
    ) -> Result<WebhookOutcome, AppError> {
        let from_session = session
            .metadata
            .get("userId")
            .or(session.client_reference_id.as_ref())
            .and_then(|id| Uuid::parse_str(id).ok());

        let user_id = match (from_session, session.customer.as_deref()) {
            (Some(id), _) => Some(id),
            (None, Some(customer)) => self
                .customers
                .find_by_customer(customer)
                .await?
                .map(|c| c.user_id),
            (None, None) => None,
        };

        let Some(user_id) = user_id else {
            tracing::warn!(event_type = %event_type, "Completed checkout has no user reference");
            return Ok(WebhookOutcome::Ignored { event_type });
        };

        if let Some(customer) = session.customer.as_deref() {
            match self.customers.save(customer, user_id).await {
                Ok(_) => {}
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(
                        user_id = %user_id,
                        customer_id = %customer,
                        "Customer already mapped to a different user"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        if !self.profiles.set_premium(user_id, true).await? {
            tracing::warn!(user_id = %user_id, "Premium granted to unknown profile");
            return Ok(WebhookOutcome::Ignored { event_type });
        }

        tracing::info!(user_id = %user_id, "Premium granted");
        Ok(WebhookOutcome::PremiumGranted { user_id })
    }

    async fn subscription_deleted(
        &self,
        subscription: DeletedSubscription,
        event_type: String,
    ) -> Result<WebhookOutcome, AppError> {
        let Some(customer) = subscription.customer else {
            tracing::warn!(event_type = %event_type, "Subscription event without customer");
            return Ok(WebhookOutcome::Ignored { event_type });
        };

        let Some(mapping) = self.customers.find_by_customer(&customer).await? else {
            tracing::warn!(customer_id = %customer, "Subscription deleted for unknown customer");
            return Ok(WebhookOutcome::Ignored { event_type });
        };

        self.profiles.set_premium(mapping.user_id, false).await?;
        tracing::info!(user_id = %mapping.user_id, customer_id = %customer, "Premium revoked");

        Ok(WebhookOutcome::PremiumRevoked {
            user_id: mapping.user_id,
        })
    }
}
