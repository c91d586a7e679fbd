//! Handlers for the caller's profile and page.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::page::{PageResponse, UpsertPageRequest};
use crate::api::dto::profile::{MeResponse, ProfileResponse, UpdateProfileRequest};
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the session identity with its profile and page, if any.
///
/// # Endpoint
///
/// `GET /api/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>, AppError> {
    let (profile, page) = tokio::try_join!(
        state.profile_service.get_profile(user.id),
        state.profile_service.get_page(user.id),
    )?;

    Ok(Json(MeResponse {
        user_id: user.id,
        email: user.email,
        profile: profile.map(ProfileResponse::from),
        page: page.map(|p| PageResponse::new(p, &state.web.site_url)),
    }))
}

/// Saves the caller's display name.
///
/// # Endpoint
///
/// `PUT /api/profile`
///
/// The premium flag cannot be changed here.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    payload.validate()?;

    let profile = state
        .profile_service
        .upsert_profile(&user, payload.full_name)
        .await?;

    Ok(Json(profile.into()))
}

/// Returns the caller's page.
///
/// # Endpoint
///
/// `GET /api/page`
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no page yet.
pub async fn get_page_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PageResponse>, AppError> {
    let page = state.profile_service.require_page(user.id).await?;

    Ok(Json(PageResponse::new(page, &state.web.site_url)))
}

/// Creates or updates the caller's page.
///
/// # Endpoint
///
/// `PUT /api/page`
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid username, template or image URL.
/// Returns 409 Conflict if the username belongs to another page.
pub async fn upsert_page_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpsertPageRequest>,
) -> Result<Json<PageResponse>, AppError> {
    payload.validate()?;

    let input = payload.into_input()?;
    let page = state.profile_service.upsert_page(&user, input).await?;

    Ok(Json(PageResponse::new(page, &state.web.site_url)))
}
