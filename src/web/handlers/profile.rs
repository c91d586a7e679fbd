//! Profile and page settings handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};

use super::pages::error_page;
use crate::application::services::profile_service::DEFAULT_COLOR_SCHEME;
use crate::domain::entities::{AuthUser, Template as PageTemplate};
use crate::error::AppError;
use crate::state::AppState;

pub struct TemplateOption {
    pub value: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

/// Template for the profile form.
///
/// All fields are empty for a user without a page; saving the form creates
/// the page.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub color_scheme: String,
    pub profile_image_url: String,
    pub templates: Vec<TemplateOption>,
    pub has_page: bool,
    pub is_premium: bool,
}

/// Renders the profile form.
///
/// # Endpoint
///
/// `GET /dashboard/profile`
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match load(&state, &user).await {
        Ok(view) => view.into_response(),
        Err(err) => error_page("your profile", err),
    }
}

async fn load(state: &AppState, user: &AuthUser) -> Result<ProfileTemplate, AppError> {
    let (profile, page) = tokio::try_join!(
        state.profile_service.get_profile(user.id),
        state.profile_service.get_page(user.id),
    )?;

    let selected = page.as_ref().map(|p| p.template).unwrap_or_default();
    let templates = PageTemplate::ALL
        .iter()
        .map(|t| TemplateOption {
            value: t.as_str(),
            description: t.description(),
            selected: *t == selected,
        })
        .collect();

    let email = profile
        .as_ref()
        .and_then(|p| p.email.clone())
        .or_else(|| user.email.clone())
        .unwrap_or_default();

    Ok(ProfileTemplate {
        email,
        full_name: profile
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .unwrap_or_default(),
        is_premium: profile.is_some_and(|p| p.is_premium),
        has_page: page.is_some(),
        username: page.as_ref().map(|p| p.username.clone()).unwrap_or_default(),
        bio: page.as_ref().and_then(|p| p.bio.clone()).unwrap_or_default(),
        color_scheme: page
            .as_ref()
            .map(|p| p.color_scheme.clone())
            .unwrap_or_else(|| DEFAULT_COLOR_SCHEME.to_string()),
        profile_image_url: page
            .and_then(|p| p.profile_image_url)
            .unwrap_or_default(),
        templates,
    })
}
