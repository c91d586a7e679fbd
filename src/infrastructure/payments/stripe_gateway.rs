//! Stripe REST client for customers and checkout sessions.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

use super::gateway::{GatewayError, PaymentGateway};
use crate::domain::entities::CheckoutSession;

/// Connection and product settings for [`StripeGateway`].
#[derive(Debug, Clone)]
pub struct StripeSettings {
    /// Base URL of the API, `https://api.stripe.com` in production.
    pub api_base: String,
    pub secret_key: String,
    /// Price of the premium subscription.
    pub price_id: String,
    /// Public site URL used to build success and cancel redirects.
    pub site_url: String,
    pub timeout: Duration,
}

/// [`PaymentGateway`] backed by the Stripe HTTP API.
///
/// Requests are form-encoded and authenticated with the secret key as a
/// bearer token. Every call is bounded by [`StripeSettings::timeout`].
pub struct StripeGateway {
    client: reqwest::Client,
    settings: StripeSettings,
}

#[derive(Deserialize)]
struct CustomerResponse {
    id: String,
}

#[derive(Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

impl StripeGateway {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the TLS backend cannot be initialized.
    pub fn new(settings: StripeSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.settings.api_base.trim_end_matches('/'), path)
    }

    fn dashboard_url(&self, query: &str) -> String {
        format!(
            "{}/dashboard?{}",
            self.settings.site_url.trim_end_matches('/'),
            query
        )
    }

    async fn post_form<T>(&self, path: &str, form: &[(&str, String)]) -> Result<T, GatewayError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .bearer_auth(&self.settings.secret_key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| status.to_string());

            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_customer(&self, email: &str, user_id: Uuid) -> Result<String, GatewayError> {
        let form = [
            ("email", email.to_string()),
            ("metadata[user_id]", user_id.to_string()),
        ];

        let customer: CustomerResponse = self.post_form("customers", &form).await?;
        tracing::info!(user_id = %user_id, customer_id = %customer.id, "Payment customer created");

        Ok(customer.id)
    }

    async fn create_checkout_session(
        &self,
        customer_id: &str,
        user_id: Uuid,
    ) -> Result<CheckoutSession, GatewayError> {
        let form = [
            ("customer", customer_id.to_string()),
            ("mode", "subscription".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price]", self.settings.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", self.dashboard_url("success=true")),
            ("cancel_url", self.dashboard_url("canceled=true")),
            ("client_reference_id", user_id.to_string()),
            ("metadata[userId]", user_id.to_string()),
        ];

        let session: SessionResponse = self.post_form("checkout/sessions", &form).await?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(api_base: &str, site_url: &str) -> StripeGateway {
        StripeGateway::new(StripeSettings {
            api_base: api_base.to_string(),
            secret_key: "sk_test_123".to_string(),
            price_id: "price_123".to_string(),
            site_url: site_url.to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gw = gateway("https://api.stripe.com/", "https://linkhaven.app");
        assert_eq!(
            gw.endpoint("checkout/sessions"),
            "https://api.stripe.com/v1/checkout/sessions"
        );
    }

    #[test]
    fn test_dashboard_redirect_urls() {
        let gw = gateway("https://api.stripe.com", "https://linkhaven.app/");
        assert_eq!(
            gw.dashboard_url("success=true"),
            "https://linkhaven.app/dashboard?success=true"
        );
        assert_eq!(
            gw.dashboard_url("canceled=true"),
            "https://linkhaven.app/dashboard?canceled=true"
        );
    }
}
