//! DTOs for `GET /api/analytics`.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::AnalyticsOverview;

#[derive(Debug, Serialize)]
pub struct DailyViewsItem {
    pub date: NaiveDate,
    pub views: i64,
}

#[derive(Debug, Serialize)]
pub struct LinkClicksItem {
    pub link_id: Uuid,
    pub title: String,
    pub url: String,
    pub click_count: i64,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub total_views: i64,
    pub total_clicks: i64,
    pub total_links: usize,
    /// Newest day first.
    pub daily: Vec<DailyViewsItem>,
    /// Most clicked first.
    pub top_links: Vec<LinkClicksItem>,
}

impl From<AnalyticsOverview> for AnalyticsResponse {
    fn from(o: AnalyticsOverview) -> Self {
        Self {
            total_views: o.total_views,
            total_clicks: o.total_clicks,
            total_links: o.total_links,
            daily: o
                .daily
                .into_iter()
                .map(|d| DailyViewsItem {
                    date: d.view_date,
                    views: d.views,
                })
                .collect(),
            top_links: o
                .top_links
                .into_iter()
                .map(|l| LinkClicksItem {
                    link_id: l.link_id,
                    title: l.title,
                    url: l.url,
                    click_count: l.click_count,
                    is_active: l.is_active,
                })
                .collect(),
        }
    }
}
