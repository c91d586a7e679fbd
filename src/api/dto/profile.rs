//! DTOs for the signed-in user's profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::page::PageResponse;
use crate::domain::entities::Profile;

/// Request body for `PUT /api/profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Display name; blank clears it.
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            is_premium: p.is_premium,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Response of `GET /api/me`. `profile` and `page` are `null` until the
/// user saves them.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub profile: Option<ProfileResponse>,
    pub page: Option<PageResponse>,
}
