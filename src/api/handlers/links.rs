//! Handlers for managing the caller's links.
//!
//! Every handler resolves the caller's page first; a link id that belongs to
//! another page is reported as not found.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::update_link::{
    CreateLinkRequest, LinkResponse, ReorderLinksRequest, SetActiveRequest, UpdateLinkRequest,
};
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links in display order, inactive ones included.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Errors
///
/// Returns 404 Not Found if the caller has no page yet.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let page = state.profile_service.require_page(user.id).await?;
    let links = state.link_service.list_links(page.id).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Adds a link at the end of the caller's list.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "title": "My shop", "url": "https://shop.example.com", "icon": "globe" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an empty or long title, a bad URL or an
/// unknown icon. Returns 404 Not Found if the caller has no page yet.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let page = state.profile_service.require_page(user.id).await?;
    let link = state
        .link_service
        .create_link(page.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// # Request Body
///
/// All fields are optional; only provided fields are changed.
/// `"icon": null` clears the icon.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails or nothing is provided.
/// Returns 404 Not Found if the link isn't on the caller's page.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let page = state.profile_service.require_page(user.id).await?;
    let link = state
        .link_service
        .update_link(page.id, id, payload.into())
        .await?;

    Ok(Json(link.into()))
}

/// Shows or hides a link on the public page.
///
/// # Endpoint
///
/// `PUT /api/links/{id}/active`
pub async fn set_link_active_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let page = state.profile_service.require_page(user.id).await?;
    let link = state
        .link_service
        .set_active(page.id, id, payload.is_active)
        .await?;

    Ok(Json(link.into()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Response
///
/// Returns `204 No Content` on success.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let page = state.profile_service.require_page(user.id).await?;
    state.link_service.delete_link(page.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Rewrites the display order of the caller's links.
///
/// # Endpoint
///
/// `PUT /api/links/order`
///
/// # Request Body
///
/// ```json
/// { "ids": ["<first link id>", "<second link id>"] }
/// ```
///
/// Links not listed keep their position value.
pub async fn reorder_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<ReorderLinksRequest>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    payload.validate()?;

    let page = state.profile_service.require_page(user.id).await?;
    let links = state
        .link_service
        .reorder_links(page.id, payload.ids)
        .await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}
