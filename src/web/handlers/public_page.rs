//! Public bio page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use super::pages::{error_page, not_found_page};
use crate::domain::counter_event::{CounterEvent, enqueue};
use crate::state::AppState;
use crate::web::render::{BioPageView, PageMeta};

#[derive(Template, WebTemplate)]
#[template(path = "bio_page.html")]
pub struct BioPageTemplate {
    pub meta: PageMeta,
    pub view: BioPageView,
}

/// Renders a user's public page and counts the visit.
///
/// # Endpoint
///
/// `GET /{username}`
///
/// # Response Codes
///
/// - **200 OK**: Page rendered; one view is queued for today
/// - **404 Not Found**: No page with that username, or its owner has no profile
/// - **500 Internal Server Error**: Storage failure
pub async fn public_page_handler(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.profile_service.public_page(&username).await {
        Ok(Some(public)) => {
            enqueue(
                &state.counter_sender,
                CounterEvent::PageView {
                    page_id: public.page.id,
                },
            );

            let view = BioPageView::build(&public.page, &public.profile, &public.links);
            BioPageTemplate {
                meta: view.meta.clone(),
                view,
            }
            .into_response()
        }
        Ok(None) => not_found_page(),
        Err(err) => error_page("this page", err),
    }
}
