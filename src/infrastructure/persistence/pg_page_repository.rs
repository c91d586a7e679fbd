//! PostgreSQL implementation of page repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Page, PageUpsert, Template};
use crate::domain::repositories::PageRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;

/// Name of the unique constraint on `pages.username`.
const USERNAME_CONSTRAINT: &str = "pages_username_key";

/// PostgreSQL repository for `pages`.
///
/// `pages.user_id` is UNIQUE, so the upsert is a single
/// `INSERT ... ON CONFLICT (user_id)` and duplicates cannot exist.
pub struct PgPageRepository {
    pool: Arc<PgPool>,
}

impl PgPageRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PageRow {
    id: Uuid,
    user_id: Uuid,
    username: String,
    bio: Option<String>,
    template: String,
    color_scheme: String,
    profile_image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PageRow> for Page {
    type Error = AppError;

    fn try_from(r: PageRow) -> Result<Self, Self::Error> {
        let template = r.template.parse::<Template>().map_err(|e| {
            AppError::internal(
                "Corrupt page template",
                json!({ "page_id": r.id, "reason": e.to_string() }),
            )
        })?;

        Ok(Page {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            bio: r.bio,
            template,
            color_scheme: r.color_scheme,
            profile_image_url: r.profile_image_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[async_trait]
impl PageRepository for PgPageRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Page>, AppError> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, user_id, username, bio, template, color_scheme,
                   profile_image_url, created_at, updated_at
            FROM pages
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Page::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Page>, AppError> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, user_id, username, bio, template, color_scheme,
                   profile_image_url, created_at, updated_at
            FROM pages
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Page::try_from).transpose()
    }

    async fn upsert(&self, page: PageUpsert) -> Result<Page, AppError> {
        let result = sqlx::query_as::<_, PageRow>(
            r#"
            INSERT INTO pages (user_id, username, bio, template, color_scheme, profile_image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                username = EXCLUDED.username,
                bio = EXCLUDED.bio,
                template = EXCLUDED.template,
                color_scheme = EXCLUDED.color_scheme,
                profile_image_url = EXCLUDED.profile_image_url,
                updated_at = NOW()
            RETURNING id, user_id, username, bio, template, color_scheme,
                      profile_image_url, created_at, updated_at
            "#,
        )
        .bind(page.user_id)
        .bind(&page.username)
        .bind(page.bio)
        .bind(page.template.as_str())
        .bind(page.color_scheme)
        .bind(page.profile_image_url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => row.try_into(),
            Err(e) if is_unique_violation_on(&e, USERNAME_CONSTRAINT) => Err(AppError::conflict(
                "Username already taken",
                json!({ "username": page.username }),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
