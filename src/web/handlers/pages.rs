//! Shared status pages: not found, error and onboarding.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::web::render::PageMeta;

/// Public 404 page.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub meta: PageMeta,
}

/// Generic "error loading" page.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub meta: PageMeta,
    pub message: String,
}

/// Call-to-action shown on dashboard routes until the user has a page.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding.html")]
pub struct OnboardingTemplate {
    pub section: &'static str,
}

pub fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            meta: PageMeta::not_found(),
        },
    )
        .into_response()
}

/// Renders a failed load as an HTML error page.
pub fn error_page(section: &str, err: AppError) -> Response {
    tracing::error!(section, error = %err, "Failed to load page data");

    let meta = PageMeta {
        title: "Something went wrong - LinkHaven".to_string(),
        description: String::new(),
        og_image: None,
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorTemplate {
            meta,
            message: format!("Error loading {}. Please try again later.", section),
        },
    )
        .into_response()
}

/// Maps a dashboard load result onto a response.
///
/// `Ok(None)` means the user has no page yet.
pub fn render_section<T: IntoResponse>(
    section: &'static str,
    loaded: Result<Option<T>, AppError>,
) -> Response {
    match loaded {
        Ok(Some(view)) => view.into_response(),
        Ok(None) => OnboardingTemplate { section }.into_response(),
        Err(err) => error_page(section, err),
    }
}
