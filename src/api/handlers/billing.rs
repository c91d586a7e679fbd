//! Handlers for premium checkout and payment provider webhooks.

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};

use crate::api::dto::checkout::{CheckoutResponse, WebhookAck};
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "stripe-signature";

/// Starts a subscription checkout for the caller.
///
/// # Endpoint
///
/// `POST /api/create-checkout-session`
///
/// # Response
///
/// ```json
/// { "sessionId": "cs_test_...", "url": "https://checkout.stripe.com/..." }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the caller's profile has no email.
/// Returns 500 Internal Server Error if the payment provider fails.
pub async fn create_checkout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let session = state.billing_service.create_checkout(&user).await?;

    Ok(Json(session.into()))
}

/// Receives a signed event from the payment provider.
///
/// # Endpoint
///
/// `POST /api/webhooks/stripe`
///
/// The raw body is verified against the `Stripe-Signature` header before it
/// is parsed. Unknown event types are acknowledged and ignored.
///
/// # Errors
///
/// Returns 400 Bad Request for a missing or invalid signature.
pub async fn stripe_webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let outcome = state
        .billing_service
        .handle_webhook(&body, signature, chrono::Utc::now().timestamp())
        .await?;

    tracing::debug!(?outcome, "Webhook processed");

    Ok(Json(WebhookAck { received: true }))
}
