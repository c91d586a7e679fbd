//! Repository trait for view and click counters.

use crate::domain::entities::{DailyViews, LinkClicks};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for analytics counters.
///
/// Increments are single atomic statements on the storage side; callers
/// never read-modify-write a counter.
///
/// # Examples
///
/// See integration tests: `tests/repository_analytics.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Adds one view to today's row of the page, creating the row if needed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_page_views(&self, page_id: Uuid) -> Result<(), AppError>;

    /// Adds one click to a link. A missing link is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_link_clicks(&self, link_id: Uuid) -> Result<(), AppError>;

    /// Returns the most recent `limit` daily rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn daily_views(&self, page_id: Uuid, limit: i64) -> Result<Vec<DailyViews>, AppError>;

    /// Returns all links of the page ordered by click count descending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn links_by_clicks(&self, page_id: Uuid) -> Result<Vec<LinkClicks>, AppError>;
}
