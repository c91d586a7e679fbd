//! PostgreSQL implementation of analytics repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{DailyViews, LinkClicks};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// PostgreSQL repository for view and click counters.
///
/// Increments go through the stored functions `increment_page_views` and
/// `increment_link_clicks` (see `migrations/`), each a single atomic
/// statement, so concurrent visits never lose updates.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DailyViewsRow {
    view_date: NaiveDate,
    views: i64,
}

#[derive(sqlx::FromRow)]
struct LinkClicksRow {
    id: Uuid,
    title: String,
    url: String,
    click_count: i64,
    is_active: bool,
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn increment_page_views(&self, page_id: Uuid) -> Result<(), AppError> {
        sqlx::query("SELECT increment_page_views($1)")
            .bind(page_id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn increment_link_clicks(&self, link_id: Uuid) -> Result<(), AppError> {
        sqlx::query("SELECT increment_link_clicks($1)")
            .bind(link_id)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn daily_views(&self, page_id: Uuid, limit: i64) -> Result<Vec<DailyViews>, AppError> {
        let rows = sqlx::query_as::<_, DailyViewsRow>(
            r#"
            SELECT view_date, views
            FROM analytics
            WHERE page_id = $1
            ORDER BY view_date DESC
            LIMIT $2
            "#,
        )
        .bind(page_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DailyViews {
                view_date: r.view_date,
                views: r.views,
            })
            .collect())
    }

    async fn links_by_clicks(&self, page_id: Uuid) -> Result<Vec<LinkClicks>, AppError> {
        let rows = sqlx::query_as::<_, LinkClicksRow>(
            r#"
            SELECT id, title, url, click_count, is_active
            FROM links
            WHERE page_id = $1
            ORDER BY click_count DESC, sort_order ASC
            "#,
        )
        .bind(page_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkClicks {
                link_id: r.id,
                title: r.title,
                url: r.url,
                click_count: r.click_count,
                is_active: r.is_active,
            })
            .collect())
    }
}
