//! PostgreSQL implementation of billing repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::BillingCustomer;
use crate::domain::repositories::BillingRepository;
use crate::error::AppError;

/// PostgreSQL repository for `billing_customers`.
pub struct PgBillingRepository {
    pool: Arc<PgPool>,
}

impl PgBillingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BillingCustomerRow {
    customer_id: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<BillingCustomerRow> for BillingCustomer {
    fn from(r: BillingCustomerRow) -> Self {
        BillingCustomer {
            customer_id: r.customer_id,
            user_id: r.user_id,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl BillingRepository for PgBillingRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<BillingCustomer>, AppError> {
        let row = sqlx::query_as::<_, BillingCustomerRow>(
            "SELECT customer_id, user_id, created_at FROM billing_customers WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(BillingCustomer::from))
    }

    async fn find_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<BillingCustomer>, AppError> {
        let row = sqlx::query_as::<_, BillingCustomerRow>(
            "SELECT customer_id, user_id, created_at FROM billing_customers WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(BillingCustomer::from))
    }

    async fn save(&self, customer_id: &str, user_id: Uuid) -> Result<BillingCustomer, AppError> {
        sqlx::query(
            r#"
            INSERT INTO billing_customers (customer_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (customer_id) DO NOTHING
            "#,
        )
        .bind(customer_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        match self.find_by_customer(customer_id).await? {
            Some(existing) if existing.user_id == user_id => Ok(existing),
            Some(existing) => Err(AppError::conflict(
                "Customer already mapped to another user",
                json!({ "customer_id": customer_id, "user_id": existing.user_id }),
            )),
            None => Err(AppError::internal(
                "Customer mapping vanished after insert",
                json!({ "customer_id": customer_id }),
            )),
        }
    }
}
