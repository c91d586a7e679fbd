//! Authenticated identity as asserted by the session provider.

use uuid::Uuid;

/// The caller behind a verified session token.
///
/// Inserted into request extensions by the authentication middleware.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}
