//! DTOs for the signed-in user's page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::application::services::PageInput;
use crate::domain::entities::{Page, Template};
use crate::error::AppError;

/// Request body for `PUT /api/page`.
///
/// ```json
/// { "username": "alice", "bio": "Maker of things", "template": "creator" }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertPageRequest {
    pub username: String,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    /// One of `creator`, `shop`, `coach`.
    pub template: Option<String>,

    #[validate(length(max = 32, message = "Color scheme must be at most 32 characters"))]
    pub color_scheme: Option<String>,

    #[validate(length(max = 2048, message = "Image URL is too long"))]
    pub profile_image_url: Option<String>,
}

impl UpsertPageRequest {
    /// Converts into service input, rejecting unknown templates.
    pub fn into_input(self) -> Result<PageInput, AppError> {
        let template = self
            .template
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| {
                t.parse::<Template>().map_err(|e| {
                    AppError::bad_request(
                        e.to_string(),
                        json!({ "allowed": Template::ALL.map(|t| t.as_str()) }),
                    )
                })
            })
            .transpose()?;

        Ok(PageInput {
            username: self.username,
            bio: self.bio,
            template,
            color_scheme: self.color_scheme,
            profile_image_url: self.profile_image_url,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub template: Template,
    pub color_scheme: String,
    pub profile_image_url: Option<String>,
    /// Absolute address of the public page.
    pub public_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PageResponse {
    pub fn new(page: Page, site_url: &str) -> Self {
        Self {
            public_url: format!("{}/{}", site_url.trim_end_matches('/'), page.username),
            id: page.id,
            username: page.username,
            bio: page.bio,
            template: page.template,
            color_scheme: page.color_scheme,
            profile_image_url: page.profile_image_url,
            created_at: page.created_at,
            updated_at: page.updated_at,
        }
    }
}
