mod common;

use linkhaven::domain::counter_event::CounterEvent;
use linkhaven::domain::counter_worker::apply_event;
use uuid::Uuid;

// ─── Bio page ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_public_page_renders_active_links_in_order() {
    let mut app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, Some("Alice Doe"));
    let page = app.store.insert_page(user, "alice");
    let second = app.store.insert_link(page.id, "Second", "https://b.example.com", 2, true);
    let first = app.store.insert_link(page.id, "First", "https://a.example.com", 1, true);
    app.store.insert_link(page.id, "Hidden", "https://h.example.com", 0, false);

    let response = app.server.get("/alice").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<title>Alice Doe - LinkHaven</title>"));
    assert!(!html.contains("Hidden"));

    let first_at = html.find(&format!("/link-click/{}", first.id)).unwrap();
    let second_at = html.find(&format!("/link-click/{}", second.id)).unwrap();
    assert!(first_at < second_at);

    assert_eq!(
        app.drain_events(),
        vec![CounterEvent::PageView { page_id: page.id }]
    );
}

#[tokio::test]
async fn test_public_page_with_only_inactive_links() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    let page = app.store.insert_page(user, "quiet");
    app.store.insert_link(page.id, "Off", "https://off.example.com", 0, false);

    let response = app.server.get("/quiet").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(!html.contains("/link-click/"));
    assert!(html.contains("@quiet"));
}

#[tokio::test]
async fn test_public_page_footer_depends_on_premium() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    app.store.insert_page(user, "bob");

    let html = app.server.get("/bob").await.text();
    assert!(html.contains("Made with ❤️ by LinkHaven"));

    app.store.set_premium_flag(user, true);

    let html = app.server.get("/bob").await.text();
    assert!(!html.contains("Made with"));
}

#[tokio::test]
async fn test_public_page_not_found() {
    let mut app = common::spawn_app();

    let response = app.server.get("/nobody").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Page Not Found - LinkHaven"));
    assert!(app.drain_events().is_empty());
}

#[tokio::test]
async fn test_public_page_without_owner_profile_is_not_found() {
    let app = common::spawn_app();
    app.store.insert_page(Uuid::new_v4(), "orphan");

    app.server.get("/orphan").await.assert_status_not_found();
}

#[tokio::test]
async fn test_username_lookup_is_case_insensitive() {
    let app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    app.store.insert_page(user, "carol");

    app.server.get("/Carol").await.assert_status_ok();
}

// ─── Link click ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_link_click_redirects_and_counts_once() {
    let mut app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    let page = app.store.insert_page(user, "dave");
    let link = app.store.insert_link(page.id, "Shop", "https://shop.example.com/", 0, true);

    let response = app.server.get(&format!("/link-click/{}", link.id)).await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://shop.example.com/");

    let events = app.drain_events();
    assert_eq!(events, vec![CounterEvent::LinkClick { link_id: link.id }]);

    apply_event(app.store.as_ref(), events[0]).await.unwrap();
    assert_eq!(app.store.link(link.id).unwrap().click_count, 1);
}

#[tokio::test]
async fn test_link_click_unknown_id() {
    let mut app = common::spawn_app();

    let response = app
        .server
        .get(&format!("/link-click/{}", Uuid::new_v4()))
        .await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert!(app.drain_events().is_empty());
}

#[tokio::test]
async fn test_link_click_malformed_id() {
    let app = common::spawn_app();

    app.server
        .get("/link-click/not-a-uuid")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_link_click_inactive_link() {
    let mut app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    let page = app.store.insert_page(user, "erin");
    let link = app.store.insert_link(page.id, "Old", "https://old.example.com", 0, false);

    app.server
        .get(&format!("/link-click/{}", link.id))
        .await
        .assert_status_not_found();
    assert!(app.drain_events().is_empty());
    assert_eq!(app.store.link(link.id).unwrap().click_count, 0);
}

#[tokio::test]
async fn test_page_view_event_increments_today() {
    let mut app = common::spawn_app();
    let user = Uuid::new_v4();
    app.store.insert_profile(user, None, None);
    let page = app.store.insert_page(user, "frank");

    for _ in 0..3 {
        app.server.get("/frank").await.assert_status_ok();
    }

    for event in app.drain_events() {
        apply_event(app.store.as_ref(), event).await.unwrap();
    }

    assert_eq!(app.store.views_today(page.id), 3);
}

// ─── Landing and demo ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_landing_page() {
    let app = common::spawn_app();

    let response = app.server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Your Link-in-Bio, <span>Simplified</span>"));
    assert!(html.contains(&format!("href=\"{}\"", common::LOGIN_URL)));
    assert!(html.contains("href=\"/demo\""));
}

#[tokio::test]
async fn test_demo_page_renders_without_counting() {
    let mut app = common::spawn_app();

    let response = app.server.get("/demo").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<title>John Doe - LinkHaven</title>"));
    assert!(html.contains("YouTube Channel"));
    assert!(html.contains("href=\"https://github.com\""));
    assert!(!html.contains("/link-click/"));
    assert!(html.contains("Made with ❤️ by LinkHaven"));
    assert!(app.drain_events().is_empty());
}
