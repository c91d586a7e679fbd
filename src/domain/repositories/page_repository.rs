//! Repository trait for public bio pages.

use crate::domain::entities::{Page, PageUpsert};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for pages.
///
/// Storage enforces one page per owner and globally unique usernames.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Finds the page owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Page>, AppError>;

    /// Finds a page by its public username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_username(&self, username: &str) -> Result<Option<Page>, AppError>;

    /// Creates the owner's page or replaces its editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username belongs to another page.
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, page: PageUpsert) -> Result<Page, AppError>;
}
