//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Lists are ordered by `sort_order`, then `created_at`, then `id`.
/// Creating and reordering lock the owning page row, and positions are
/// unique per page (`links_page_sort_key`, checked at commit).
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    page_id: Uuid,
    title: String,
    url: String,
    icon: Option<String>,
    click_count: i64,
    sort_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            page_id: r.page_id,
            title: r.title,
            url: r.url,
            icon: r.icon,
            click_count: r.click_count,
            sort_order: r.sort_order,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn list_by_page(&self, page_id: Uuid) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, page_id, title, url, icon, click_count, sort_order,
                   is_active, created_at, updated_at
            FROM links
            WHERE page_id = $1
            ORDER BY sort_order ASC, created_at ASC, id ASC
            "#,
        )
        .bind(page_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn list_active_by_page(&self, page_id: Uuid) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, page_id, title, url, icon, click_count, sort_order,
                   is_active, created_at, updated_at
            FROM links
            WHERE page_id = $1 AND is_active = TRUE
            ORDER BY sort_order ASC, created_at ASC, id ASC
            "#,
        )
        .bind(page_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, page_id, title, url, icon, click_count, sort_order,
                   is_active, created_at, updated_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn create(&self, page_id: Uuid, new_link: NewLink) -> Result<Link, AppError> {
        let mut tx = self.pool.begin().await?;
        lock_page(&mut tx, page_id).await?;

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (page_id, title, url, icon, sort_order)
            SELECT $1, $2, $3, $4, COALESCE(MAX(sort_order) + 1, 0)
            FROM links
            WHERE page_id = $1
            RETURNING id, page_id, title, url, icon, click_count, sort_order,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(page_id)
        .bind(new_link.title)
        .bind(new_link.url)
        .bind(new_link.icon)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, patch: LinkPatch) -> Result<Option<Link>, AppError> {
        let icon_set = patch.icon.is_some();
        let icon = patch.icon.flatten();

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links SET
                title = COALESCE($2, title),
                url = COALESCE($3, url),
                icon = CASE WHEN $4 THEN $5 ELSE icon END,
                sort_order = COALESCE($6, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, page_id, title, url, icon, click_count, sort_order,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.url)
        .bind(icon_set)
        .bind(icon)
        .bind(patch.sort_order)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, page_id, title, url, icon, click_count, sort_order,
                      is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn reorder(&self, page_id: Uuid, ordered_ids: Vec<Uuid>) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        lock_page(&mut tx, page_id).await?;

        let result = sqlx::query(
            r#"
            WITH listed AS (
                SELECT id, position
                FROM UNNEST($2::uuid[]) WITH ORDINALITY AS o(id, position)
            ),
            ranked AS (
                SELECT l.id,
                       ROW_NUMBER() OVER (
                           ORDER BY listed.position ASC NULLS LAST,
                                    l.sort_order ASC, l.created_at ASC, l.id ASC
                       ) - 1 AS position
                FROM links AS l
                LEFT JOIN listed ON listed.id = l.id
                WHERE l.page_id = $1
            )
            UPDATE links AS l
            SET sort_order = ranked.position::int, updated_at = NOW()
            FROM ranked
            WHERE l.id = ranked.id
            "#,
        )
        .bind(page_id)
        .bind(ordered_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

/// Serializes position changes on one page until the transaction ends.
async fn lock_page(tx: &mut Transaction<'_, Postgres>, page_id: Uuid) -> Result<(), AppError> {
    sqlx::query("SELECT 1 FROM pages WHERE id = $1 FOR UPDATE")
        .bind(page_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
