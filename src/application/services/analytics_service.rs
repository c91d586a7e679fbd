//! Dashboard analytics read model.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::AnalyticsOverview;
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// Service for page analytics.
///
/// Only reads live here; increments are applied by the counter worker.
pub struct AnalyticsService {
    repository: Arc<dyn AnalyticsRepository>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn AnalyticsRepository>) -> Self {
        Self { repository }
    }

    /// Last [`AnalyticsOverview::MAX_DAYS`] days of views and per-link clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn overview(&self, page_id: Uuid) -> Result<AnalyticsOverview, AppError> {
        let (daily, top_links) = tokio::try_join!(
            self.repository
                .daily_views(page_id, AnalyticsOverview::MAX_DAYS),
            self.repository.links_by_clicks(page_id),
        )?;

        Ok(AnalyticsOverview::new(daily, top_links))
    }
}
