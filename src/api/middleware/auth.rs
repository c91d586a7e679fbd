//! Session authentication for the JSON API.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState, utils::cookies::read_cookie};

/// Resolves the caller from `Authorization: Bearer <jwt>` or, failing that,
/// from the session cookie, and stores the resulting
/// [`crate::domain::entities::AuthUser`] in request extensions.
///
/// Handlers behind this layer take `Extension<AuthUser>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if neither
/// source carries a valid, unexpired token.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/me", get(me_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => Some(token),
        Err(_) => read_cookie(&parts.headers, &st.web.session_cookie),
    };

    let user = st.auth_service.require_user(token.as_deref())?;
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}
