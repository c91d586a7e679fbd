//! Analytics read models: per-day page views and per-link click totals.

use chrono::NaiveDate;
use uuid::Uuid;

/// View counter for one page on one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyViews {
    pub view_date: NaiveDate,
    pub views: i64,
}

/// Click total for one link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkClicks {
    pub link_id: Uuid,
    pub title: String,
    pub url: String,
    pub click_count: i64,
    pub is_active: bool,
}

/// Aggregated analytics for a page dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsOverview {
    /// Most recent days first, at most [`AnalyticsOverview::MAX_DAYS`].
    pub daily: Vec<DailyViews>,
    /// Every link of the page, most clicked first.
    pub top_links: Vec<LinkClicks>,
    pub total_views: i64,
    pub total_clicks: i64,
    pub total_links: usize,
}

impl AnalyticsOverview {
    pub const MAX_DAYS: i64 = 30;

    pub fn new(daily: Vec<DailyViews>, top_links: Vec<LinkClicks>) -> Self {
        let total_views = daily.iter().map(|d| d.views).sum();
        let total_clicks = top_links.iter().map(|l| l.click_count).sum();
        let total_links = top_links.len();

        Self {
            daily,
            top_links,
            total_views,
            total_clicks,
            total_links,
        }
    }
}
