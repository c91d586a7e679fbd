//! Link management page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State, response::Response};
use uuid::Uuid;

use super::pages::render_section;
use crate::domain::entities::{AuthUser, Link, LinkIcon};
use crate::error::AppError;
use crate::state::AppState;

/// One row of the link list.
pub struct LinkRow {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub icon_tag: String,
    pub glyph: &'static str,
    pub color: &'static str,
    pub click_count: i64,
    pub is_active: bool,
}

impl From<Link> for LinkRow {
    fn from(link: Link) -> Self {
        let icon = link.icon();
        Self {
            id: link.id,
            icon_tag: icon.tag().unwrap_or_default().to_string(),
            glyph: icon.glyph(),
            color: icon.color(),
            title: link.title,
            url: link.url,
            click_count: link.click_count,
            is_active: link.is_active,
        }
    }
}

/// Entry of the icon picker.
pub struct IconOption {
    pub tag: &'static str,
    pub label: &'static str,
    pub glyph: &'static str,
}

/// Template for the links management page.
///
/// Renders `templates/links.html` with the link creation form and the
/// current list. Edits go through the JSON API from `static/dashboard.js`.
#[derive(Template, WebTemplate)]
#[template(path = "links.html")]
pub struct LinksTemplate {
    pub links: Vec<LinkRow>,
    pub icons: Vec<IconOption>,
}

/// Renders the link management page.
///
/// # Endpoint
///
/// `GET /dashboard/links`
pub async fn links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    render_section("links", load(&state, &user).await)
}

async fn load(state: &AppState, user: &AuthUser) -> Result<Option<LinksTemplate>, AppError> {
    let Some(page) = state.profile_service.get_page(user.id).await? else {
        return Ok(None);
    };

    let links = state.link_service.list_links(page.id).await?;

    Ok(Some(LinksTemplate {
        links: links.into_iter().map(LinkRow::from).collect(),
        icons: icon_options(),
    }))
}

fn icon_options() -> Vec<IconOption> {
    LinkIcon::SELECTABLE
        .iter()
        .filter_map(|icon| {
            Some(IconOption {
                tag: icon.tag()?,
                label: icon.label(),
                glyph: icon.glyph(),
            })
        })
        .collect()
}
