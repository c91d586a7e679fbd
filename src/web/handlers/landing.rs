//! Marketing pages: landing and demo.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use super::public_page::BioPageTemplate;
use crate::state::AppState;
use crate::web::render::{BioPageView, PageMeta};

#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub meta: PageMeta,
    pub login_url: String,
}

/// `GET /`
pub async fn landing_handler(State(state): State<AppState>) -> LandingTemplate {
    LandingTemplate {
        meta: PageMeta {
            title: "LinkHaven - Your Link-in-Bio, Simplified".to_string(),
            description: "Create a beautiful, customizable page to showcase all your \
                          important links."
                .to_string(),
            og_image: None,
        },
        login_url: state.web.login_url.clone(),
    }
}

/// `GET /demo`. Sample bio page; no views are counted.
pub async fn demo_handler() -> BioPageTemplate {
    let view = BioPageView::demo();
    BioPageTemplate {
        meta: view.meta.clone(),
        view,
    }
}
