#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use uuid::Uuid;

use linkhaven::api::middleware::rate_limit::RateLimit;
use linkhaven::application::services::{
    AnalyticsService, AuthService, BillingService, LinkService, ProfileService, WebhookSettings,
};
use linkhaven::domain::counter_event::CounterEvent;
use linkhaven::domain::entities::{
    BillingCustomer, CheckoutSession, DailyViews, Link, LinkClicks, LinkPatch, NewLink, Page,
    PageUpsert, Profile, ProfileUpsert, Template,
};
use linkhaven::domain::repositories::{
    AnalyticsRepository, BillingRepository, LinkRepository, PageRepository, ProfileRepository,
};
use linkhaven::error::AppError;
use linkhaven::infrastructure::payments::{GatewayError, PaymentGateway};
use linkhaven::routes::build_router;
use linkhaven::state::{AppState, WebSettings};

pub const JWT_SECRET: &str = "test-jwt-secret";
pub const WEBHOOK_SECRET: &str = "whsec_test";
pub const SESSION_COOKIE: &str = "sb-access-token";
pub const LOGIN_URL: &str = "/auth/login";
pub const SITE_URL: &str = "http://localhost:3000";

// ─── In-memory storage ───────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    pages: HashMap<Uuid, Page>,
    links: HashMap<Uuid, Link>,
    views: HashMap<(Uuid, NaiveDate), i64>,
    customers: HashMap<String, BillingCustomer>,
}

/// Implements every repository trait over shared maps.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn insert_profile(
        &self,
        id: Uuid,
        email: Option<&str>,
        full_name: Option<&str>,
    ) -> Profile {
        let profile = Profile {
            id,
            email: email.map(str::to_string),
            full_name: full_name.map(str::to_string),
            is_premium: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables
            .lock()
            .unwrap()
            .profiles
            .insert(id, profile.clone());
        profile
    }

    pub fn insert_page(&self, user_id: Uuid, username: &str) -> Page {
        let page = Page {
            id: Uuid::new_v4(),
            user_id,
            username: username.to_string(),
            bio: None,
            template: Template::Creator,
            color_scheme: "default".to_string(),
            profile_image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables
            .lock()
            .unwrap()
            .pages
            .insert(page.id, page.clone());
        page
    }

    pub fn insert_link(
        &self,
        page_id: Uuid,
        title: &str,
        url: &str,
        sort_order: i32,
        is_active: bool,
    ) -> Link {
        let link = Link {
            id: Uuid::new_v4(),
            page_id,
            title: title.to_string(),
            url: url.to_string(),
            icon: None,
            click_count: 0,
            sort_order,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.tables
            .lock()
            .unwrap()
            .links
            .insert(link.id, link.clone());
        link
    }

    pub fn profile(&self, id: Uuid) -> Option<Profile> {
        self.tables.lock().unwrap().profiles.get(&id).cloned()
    }

    pub fn link(&self, id: Uuid) -> Option<Link> {
        self.tables.lock().unwrap().links.get(&id).cloned()
    }

    pub fn set_premium_flag(&self, id: Uuid, is_premium: bool) {
        if let Some(p) = self.tables.lock().unwrap().profiles.get_mut(&id) {
            p.is_premium = is_premium;
        }
    }

    pub fn views_today(&self, page_id: Uuid) -> i64 {
        let today = Utc::now().date_naive();
        self.tables
            .lock()
            .unwrap()
            .views
            .get(&(page_id, today))
            .copied()
            .unwrap_or(0)
    }

    pub fn insert_customer(&self, customer_id: &str, user_id: Uuid) {
        self.tables.lock().unwrap().customers.insert(
            customer_id.to_string(),
            BillingCustomer {
                customer_id: customer_id.to_string(),
                user_id,
                created_at: Utc::now(),
            },
        );
    }

    pub fn customer_of(&self, user_id: Uuid) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .customers
            .values()
            .find(|c| c.user_id == user_id)
            .map(|c| c.customer_id.clone())
    }
}

fn sorted(mut links: Vec<Link>) -> Vec<Link> {
    links.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then(a.created_at.cmp(&b.created_at))
    });
    links
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self.profile(id))
    }

    async fn upsert(&self, profile: ProfileUpsert) -> Result<Profile, AppError> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let entry = t.profiles.entry(profile.id).or_insert_with(|| Profile {
            id: profile.id,
            email: None,
            full_name: None,
            is_premium: false,
            created_at: now,
            updated_at: now,
        });
        entry.full_name = profile.full_name;
        if entry.email.is_none() {
            entry.email = profile.email;
        }
        entry.updated_at = now;
        Ok(entry.clone())
    }

    async fn create_if_missing(
        &self,
        id: Uuid,
        email: Option<String>,
    ) -> Result<Profile, AppError> {
        let mut t = self.tables.lock().unwrap();
        let now = Utc::now();
        let entry = t.profiles.entry(id).or_insert_with(|| Profile {
            id,
            email,
            full_name: None,
            is_premium: false,
            created_at: now,
            updated_at: now,
        });
        Ok(entry.clone())
    }

    async fn set_premium(&self, id: Uuid, is_premium: bool) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        match t.profiles.get_mut(&id) {
            Some(p) => {
                p.is_premium = is_premium;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl PageRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Page>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.pages.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Page>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.pages.values().find(|p| p.username == username).cloned())
    }

    async fn upsert(&self, page: PageUpsert) -> Result<Page, AppError> {
        let mut t = self.tables.lock().unwrap();

        if t
            .pages
            .values()
            .any(|p| p.username == page.username && p.user_id != page.user_id)
        {
            return Err(AppError::conflict(
                "Username already taken",
                json!({ "username": page.username }),
            ));
        }

        let now = Utc::now();
        let existing = t.pages.values().find(|p| p.user_id == page.user_id).cloned();
        let stored = Page {
            id: existing.as_ref().map(|p| p.id).unwrap_or_else(Uuid::new_v4),
            user_id: page.user_id,
            username: page.username,
            bio: page.bio,
            template: page.template,
            color_scheme: page.color_scheme,
            profile_image_url: page.profile_image_url,
            created_at: existing.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        };
        t.pages.insert(stored.id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn list_by_page(&self, page_id: Uuid) -> Result<Vec<Link>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted(
            t.links.values().filter(|l| l.page_id == page_id).cloned().collect(),
        ))
    }

    async fn list_active_by_page(&self, page_id: Uuid) -> Result<Vec<Link>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(sorted(
            t.links
                .values()
                .filter(|l| l.page_id == page_id && l.is_active)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>, AppError> {
        Ok(self.link(id))
    }

    async fn create(&self, page_id: Uuid, new_link: NewLink) -> Result<Link, AppError> {
        let mut t = self.tables.lock().unwrap();
        let next = t
            .links
            .values()
            .filter(|l| l.page_id == page_id)
            .map(|l| l.sort_order + 1)
            .max()
            .unwrap_or(0);
        let now = Utc::now();
        let link = Link {
            id: Uuid::new_v4(),
            page_id,
            title: new_link.title,
            url: new_link.url,
            icon: new_link.icon,
            click_count: 0,
            sort_order: next,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        t.links.insert(link.id, link.clone());
        Ok(link)
    }

    async fn update(&self, id: Uuid, patch: LinkPatch) -> Result<Option<Link>, AppError> {
        let mut t = self.tables.lock().unwrap();
        let Some(link) = t.links.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            link.title = title;
        }
        if let Some(url) = patch.url {
            link.url = url;
        }
        if let Some(icon) = patch.icon {
            link.icon = icon;
        }
        if let Some(sort_order) = patch.sort_order {
            link.sort_order = sort_order;
        }
        link.updated_at = Utc::now();
        Ok(Some(link.clone()))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Link>, AppError> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.links.get_mut(&id).map(|l| {
            l.is_active = is_active;
            l.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.lock().unwrap().links.remove(&id).is_some())
    }

    async fn reorder(&self, page_id: Uuid, ordered_ids: Vec<Uuid>) -> Result<u64, AppError> {
        let mut t = self.tables.lock().unwrap();
        let mut page: Vec<&mut Link> = t
            .links
            .values_mut()
            .filter(|l| l.page_id == page_id)
            .collect();
        let rank = |id: &Uuid| {
            ordered_ids
                .iter()
                .position(|o| o == id)
                .unwrap_or(usize::MAX)
        };
        page.sort_by_key(|l| (rank(&l.id), l.sort_order, l.created_at, l.id));
        for (position, link) in page.iter_mut().enumerate() {
            link.sort_order = position as i32;
        }
        Ok(page.len() as u64)
    }
}

#[async_trait]
impl AnalyticsRepository for MemoryStore {
    async fn increment_page_views(&self, page_id: Uuid) -> Result<(), AppError> {
        let today = Utc::now().date_naive();
        *self
            .tables
            .lock()
            .unwrap()
            .views
            .entry((page_id, today))
            .or_insert(0) += 1;
        Ok(())
    }

    async fn increment_link_clicks(&self, link_id: Uuid) -> Result<(), AppError> {
        if let Some(link) = self.tables.lock().unwrap().links.get_mut(&link_id) {
            link.click_count += 1;
        }
        Ok(())
    }

    async fn daily_views(&self, page_id: Uuid, limit: i64) -> Result<Vec<DailyViews>, AppError> {
        let t = self.tables.lock().unwrap();
        let mut days: Vec<DailyViews> = t
            .views
            .iter()
            .filter(|((p, _), _)| *p == page_id)
            .map(|((_, date), views)| DailyViews {
                view_date: *date,
                views: *views,
            })
            .collect();
        days.sort_by(|a, b| b.view_date.cmp(&a.view_date));
        days.truncate(limit as usize);
        Ok(days)
    }

    async fn links_by_clicks(&self, page_id: Uuid) -> Result<Vec<LinkClicks>, AppError> {
        let t = self.tables.lock().unwrap();
        let mut links: Vec<&Link> = t.links.values().filter(|l| l.page_id == page_id).collect();
        links.sort_by(|a, b| {
            b.click_count
                .cmp(&a.click_count)
                .then(a.sort_order.cmp(&b.sort_order))
        });
        Ok(links
            .into_iter()
            .map(|l| LinkClicks {
                link_id: l.id,
                title: l.title.clone(),
                url: l.url.clone(),
                click_count: l.click_count,
                is_active: l.is_active,
            })
            .collect())
    }
}

#[async_trait]
impl BillingRepository for MemoryStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<BillingCustomer>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.customers.values().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<BillingCustomer>, AppError> {
        Ok(self.tables.lock().unwrap().customers.get(customer_id).cloned())
    }

    async fn save(&self, customer_id: &str, user_id: Uuid) -> Result<BillingCustomer, AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(existing) = t.customers.get(customer_id) {
            if existing.user_id == user_id {
                return Ok(existing.clone());
            }
            return Err(AppError::conflict(
                "Customer already mapped to another user",
                json!({ "customer_id": customer_id }),
            ));
        }
        if t.customers.values().any(|c| c.user_id == user_id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "billing_customers_user_id_key" }),
            ));
        }
        let customer = BillingCustomer {
            customer_id: customer_id.to_string(),
            user_id,
            created_at: Utc::now(),
        };
        t.customers.insert(customer_id.to_string(), customer.clone());
        Ok(customer)
    }
}

// ─── Payment gateway ─────────────────────────────────────────────────────────

/// Records calls and answers with canned ids.
#[derive(Default)]
pub struct FakeGateway {
    pub fail: Mutex<bool>,
    pub customers_created: Mutex<Vec<(String, Uuid)>>,
    pub sessions_created: Mutex<Vec<(String, Uuid)>>,
}

impl FakeGateway {
    pub fn fail_next(&self) {
        *self.fail.lock().unwrap() = true;
    }

    fn check(&self) -> Result<(), GatewayError> {
        if std::mem::take(&mut *self.fail.lock().unwrap()) {
            return Err(GatewayError::Api {
                status: 402,
                message: "Your card was declined".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_customer(&self, email: &str, user_id: Uuid) -> Result<String, GatewayError> {
        self.check()?;
        let mut created = self.customers_created.lock().unwrap();
        created.push((email.to_string(), user_id));
        Ok(format!("cus_test_{}", created.len()))
    }

    async fn create_checkout_session(
        &self,
        customer_id: &str,
        user_id: Uuid,
    ) -> Result<CheckoutSession, GatewayError> {
        self.check()?;
        let mut created = self.sessions_created.lock().unwrap();
        created.push((customer_id.to_string(), user_id));
        let id = format!("cs_test_{}", created.len());
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.stripe.com/c/pay/{}", id)),
            id,
        })
    }
}

// ─── App under test ──────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<FakeGateway>,
    pub counter_rx: mpsc::Receiver<CounterEvent>,
}

impl TestApp {
    /// Drains queued counter events without applying them.
    pub fn drain_events(&mut self) -> Vec<CounterEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.counter_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Builds the full router over fresh in-memory storage, without rate limits.
pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let gateway = Arc::new(FakeGateway::default());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState {
        auth_service: Arc::new(AuthService::new(JWT_SECRET, None)),
        profile_service: Arc::new(ProfileService::new(
            store.clone(),
            store.clone(),
            store.clone(),
        )),
        link_service: Arc::new(LinkService::new(store.clone())),
        analytics_service: Arc::new(AnalyticsService::new(store.clone())),
        billing_service: Arc::new(BillingService::new(
            store.clone(),
            store.clone(),
            gateway.clone(),
            WebhookSettings {
                secret: WEBHOOK_SECRET.to_string(),
                tolerance_secs: 300,
            },
        )),
        counter_sender: tx,
        web: Arc::new(WebSettings {
            login_url: LOGIN_URL.to_string(),
            session_cookie: SESSION_COOKIE.to_string(),
            site_url: SITE_URL.to_string(),
        }),
    };

    let app = build_router(state, RateLimit::Disabled);

    TestApp {
        server: TestServer::new(app).unwrap(),
        store,
        gateway,
        counter_rx: rx,
    }
}

#[derive(Serialize)]
struct TestClaims<'a> {
    sub: String,
    email: Option<&'a str>,
    exp: i64,
}

/// Signs an access token the way the identity provider would.
pub fn token_for(user_id: Uuid, email: Option<&str>) -> String {
    let claims = TestClaims {
        sub: user_id.to_string(),
        email,
        exp: Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(user_id: Uuid) -> String {
    format!("Bearer {}", token_for(user_id, Some("user@example.com")))
}

pub fn session_cookie(user_id: Uuid) -> String {
    format!(
        "{}={}",
        SESSION_COOKIE,
        token_for(user_id, Some("user@example.com"))
    )
}

// ─── PostgreSQL fixtures ─────────────────────────────────────────────────────

/// Inserts a profile and its page, returning `(user_id, page_id)`.
pub async fn seed_page(pool: &sqlx::PgPool, username: &str) -> (Uuid, Uuid) {
    let user_id = Uuid::new_v4();
    sqlx::query("INSERT INTO user_profiles (id, email) VALUES ($1, $2)")
        .bind(user_id)
        .bind(format!("{}@example.com", username))
        .execute(pool)
        .await
        .unwrap();

    let page_id: Uuid =
        sqlx::query_scalar("INSERT INTO pages (user_id, username) VALUES ($1, $2) RETURNING id")
            .bind(user_id)
            .bind(username)
            .fetch_one(pool)
            .await
            .unwrap();

    (user_id, page_id)
}
