//! Repository trait for payment customer mappings.

use crate::domain::entities::BillingCustomer;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for the customer id to profile mapping.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingRepository: Send + Sync {
    /// Finds the payment customer created for a profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<BillingCustomer>, AppError>;

    /// Finds the profile a payment customer belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_customer(&self, customer_id: &str)
    -> Result<Option<BillingCustomer>, AppError>;

    /// Stores the mapping. Saving an existing pair again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the customer or the user is already
    /// mapped to someone else.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, customer_id: &str, user_id: Uuid) -> Result<BillingCustomer, AppError>;
}
