//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch, NewLink};

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    pub title: String,

    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,

    /// Icon tag such as `youtube`; omitted or blank for the default icon.
    pub icon: Option<String>,
}

impl From<CreateLinkRequest> for NewLink {
    fn from(r: CreateLinkRequest) -> Self {
        NewLink {
            title: r.title,
            url: r.url,
            icon: r.icon,
        }
    }
}

/// Request body for `PATCH /api/links/{id}`.
///
/// All fields are optional; only provided fields are changed.
///
/// # `icon` semantics
///
/// - **Absent** → leave the icon unchanged
/// - **`null`** → clear the icon
/// - **Tag** → set the icon
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    pub title: Option<String>,

    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub icon: Option<Option<String>>,

    #[validate(range(min = 0, message = "Sort order must not be negative"))]
    pub sort_order: Option<i32>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(r: UpdateLinkRequest) -> Self {
        LinkPatch {
            title: r.title,
            url: r.url,
            icon: r.icon,
            sort_order: r.sort_order,
        }
    }
}

/// Request body for `PUT /api/links/{id}/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Request body for `PUT /api/links/order`: link ids in display order.
#[derive(Debug, Deserialize, Validate)]
pub struct ReorderLinksRequest {
    #[validate(length(min = 1, max = 500, message = "Provide between 1 and 500 ids"))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub click_count: i64,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(l: Link) -> Self {
        Self {
            id: l.id,
            title: l.title,
            url: l.url,
            icon: l.icon,
            click_count: l.click_count,
            sort_order: l.sort_order,
            is_active: l.is_active,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}
