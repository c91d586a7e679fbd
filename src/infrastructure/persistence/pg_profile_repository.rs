//! PostgreSQL implementation of profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Profile, ProfileUpsert};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

/// PostgreSQL repository for `user_profiles`.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    email: Option<String>,
    full_name: Option<String>,
    is_premium: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Profile {
            id: r.id,
            email: r.email,
            full_name: r.full_name,
            is_premium: r.is_premium,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, full_name, is_premium, created_at, updated_at
            FROM user_profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Profile::from))
    }

    async fn upsert(&self, profile: ProfileUpsert) -> Result<Profile, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profiles (id, email, full_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = COALESCE(user_profiles.email, EXCLUDED.email),
                updated_at = NOW()
            RETURNING id, email, full_name, is_premium, created_at, updated_at
            "#,
        )
        .bind(profile.id)
        .bind(profile.email)
        .bind(profile.full_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn create_if_missing(
        &self,
        id: Uuid,
        email: Option<String>,
    ) -> Result<Profile, AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (id, email)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(email)
        .execute(self.pool.as_ref())
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::internal(
                "Profile vanished after insert",
                serde_json::json!({ "user_id": id }),
            )
        })
    }

    async fn set_premium(&self, id: Uuid, is_premium: bool) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE user_profiles
            SET is_premium = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_premium)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
