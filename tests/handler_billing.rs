mod common;

use chrono::Utc;
use linkhaven::infrastructure::payments::webhook_signature::sign_payload;
use serde_json::{Value, json};
use uuid::Uuid;

fn completed_event(user_id: Uuid, customer: &str) -> String {
    json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": "cs_test_1",
            "customer": customer,
            "client_reference_id": user_id.to_string(),
            "metadata": { "userId": user_id.to_string() }
        }}
    })
    .to_string()
}

fn deleted_event(customer: &str) -> String {
    json!({
        "id": "evt_2",
        "type": "customer.subscription.deleted",
        "data": { "object": { "id": "sub_1", "customer": customer } }
    })
    .to_string()
}

fn signed(payload: &str) -> String {
    sign_payload(
        payload.as_bytes(),
        common::WEBHOOK_SECRET,
        Utc::now().timestamp(),
    )
}

// ─── Checkout ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_checkout_requires_session() {
    let app = common::spawn_app();

    app.server
        .post("/api/create-checkout-session")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_checkout_requires_email() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);

    let response = app
        .server
        .post("/api/create-checkout-session")
        .add_header("Authorization", common::bearer(user))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "User email not found"
    );
    assert!(app.gateway.sessions_created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_creates_and_reuses_customer() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, Some("kim@example.com"), None);

    let first = app
        .server
        .post("/api/create-checkout-session")
        .add_header("Authorization", common::bearer(user))
        .await;
    first.assert_status_ok();
    let json = first.json::<Value>();
    assert_eq!(json["sessionId"], "cs_test_1");
    assert!(json["url"].as_str().unwrap().starts_with("https://checkout.stripe.com/"));
    assert_eq!(app.store.customer_of(user).as_deref(), Some("cus_test_1"));

    app.server
        .post("/api/create-checkout-session")
        .add_header("Authorization", common::bearer(user))
        .await
        .assert_status_ok();

    assert_eq!(app.gateway.customers_created.lock().unwrap().len(), 1);
    let sessions = app.gateway.sessions_created.lock().unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|(c, u)| c == "cus_test_1" && *u == user));
}

#[tokio::test]
async fn test_checkout_provider_failure() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, Some("lee@example.com"), None);
    app.gateway.fail_next();

    let response = app
        .server
        .post("/api/create-checkout-session")
        .add_header("Authorization", common::bearer(user))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"]["code"], "internal_error");
}

// ─── Webhook ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_webhook_rejects_bad_signature() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    let payload = completed_event(user, "cus_1");

    let forged = sign_payload(payload.as_bytes(), "whsec_wrong", Utc::now().timestamp());

    app.server
        .post("/api/webhooks/stripe")
        .add_header("Stripe-Signature", forged)
        .text(payload.clone())
        .await
        .assert_status_bad_request();

    app.server
        .post("/api/webhooks/stripe")
        .text(payload)
        .await
        .assert_status_bad_request();

    assert!(!app.store.profile(user).unwrap().is_premium);
    assert!(app.store.customer_of(user).is_none());
}

#[tokio::test]
async fn test_webhook_rejects_stale_timestamp() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    let payload = completed_event(user, "cus_1");
    let old = sign_payload(
        payload.as_bytes(),
        common::WEBHOOK_SECRET,
        Utc::now().timestamp() - 3600,
    );

    app.server
        .post("/api/webhooks/stripe")
        .add_header("Stripe-Signature", old)
        .text(payload)
        .await
        .assert_status_bad_request();

    assert!(!app.store.profile(user).unwrap().is_premium);
}

#[tokio::test]
async fn test_checkout_completed_grants_premium_to_that_user_only() {
    let app = common::spawn_app();
    let buyer = Uuid::new_v4();
    let bystander = Uuid::new_v4();
    app.store.insert_profile(buyer, None, None);
    app.store.insert_profile(bystander, None, None);
    let payload = completed_event(buyer, "cus_buyer");

    let response = app
        .server
        .post("/api/webhooks/stripe")
        .add_header("Stripe-Signature", signed(&payload))
        .text(payload)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "received": true }));
    assert!(app.store.profile(buyer).unwrap().is_premium);
    assert!(!app.store.profile(bystander).unwrap().is_premium);
    assert_eq!(app.store.customer_of(buyer).as_deref(), Some("cus_buyer"));
}

#[tokio::test]
async fn test_subscription_deleted_revokes_premium() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    app.store.set_premium_flag(user, true);
    app.store.insert_customer("cus_gone", user);
    let payload = deleted_event("cus_gone");

    app.server
        .post("/api/webhooks/stripe")
        .add_header("Stripe-Signature", signed(&payload))
        .text(payload)
        .await
        .assert_status_ok();

    assert!(!app.store.profile(user).unwrap().is_premium);
}

#[tokio::test]
async fn test_subscription_deleted_for_unknown_customer_is_acknowledged() {
    let app = common::spawn_app();
    let payload = deleted_event("cus_unknown");

    app.server
        .post("/api/webhooks/stripe")
        .add_header("Stripe-Signature", signed(&payload))
        .text(payload)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_unhandled_event_is_acknowledged() {
    let app = common::spawn_app();
    let payload = json!({
        "type": "invoice.paid",
        "data": { "object": { "id": "in_1" } }
    })
    .to_string();

    let response = app
        .server
        .post("/api/webhooks/stripe")
        .add_header("Stripe-Signature", signed(&payload))
        .text(payload)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["received"], true);
}

#[tokio::test]
async fn test_malformed_payload_with_valid_signature() {
    let app = common::spawn_app();
    let payload = "{not json".to_string();

    app.server
        .post("/api/webhooks/stripe")
        .add_header("Stripe-Signature", signed(&payload))
        .text(payload)
        .await
        .assert_status_bad_request();
}
