//! Repository trait for page links.

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for managing the links of a page.
///
/// Ownership checks live in [`crate::application::services::LinkService`];
/// the repository addresses links by id only.
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Lists every link of a page ordered by `sort_order` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_page(&self, page_id: Uuid) -> Result<Vec<Link>, AppError>;

    /// Lists the active links of a page ordered by `sort_order` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_active_by_page(&self, page_id: Uuid) -> Result<Vec<Link>, AppError>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Link>, AppError>;

    /// Appends a link to the end of the page's list.
    ///
    /// The new link gets `sort_order = max(sort_order) + 1` within the page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, page_id: Uuid, new_link: NewLink) -> Result<Link, AppError>;

    /// Partially updates a link. Returns `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: Uuid, patch: LinkPatch) -> Result<Option<Link>, AppError>;

    /// Shows or hides a link. Returns `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Link>, AppError>;

    /// Deletes a link. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Renumbers every link of `page_id` to `0..n`, in one transaction.
    ///
    /// Ids in `ordered_ids` come first in the given order; the page's other
    /// links follow in their current order. Ids of other pages are ignored.
    ///
    /// Returns the number of links updated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn reorder(&self, page_id: Uuid, ordered_ids: Vec<Uuid>) -> Result<u64, AppError>;
}
