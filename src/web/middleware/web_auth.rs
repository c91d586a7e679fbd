//! Cookie-based authentication middleware for the web dashboard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::{state::AppState, utils::cookies::read_cookie};

/// Authenticates dashboard requests using the session cookie.
///
/// # Cookie Format
///
/// ```text
/// Cookie: sb-access-token=<jwt>
/// ```
///
/// The cookie name comes from `SESSION_COOKIE_NAME`.
///
/// # Differences from API Auth
///
/// Unlike the API auth middleware which returns `401 Unauthorized`,
/// this middleware answers `303 See Other` to the configured login URL so
/// the browser lands on the sign-in form. The handler is never reached.
///
/// On success the [`crate::domain::entities::AuthUser`] is stored in request
/// extensions.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let token = read_cookie(req.headers(), &st.web.session_cookie);

    match st.auth_service.current_user(token.as_deref()) {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => Err(Redirect::to(&st.web.login_url)),
    }
}
