//! Session token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::AuthUser;
use crate::error::AppError;

/// Claims read from an access token issued by the authentication provider.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies HS256 access tokens and resolves them to an [`AuthUser`].
///
/// The token's signature and `exp` are always checked; `aud` is checked when
/// an audience is configured. Tokens are never stored.
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a verifier for tokens signed with `secret`.
    ///
    /// # Arguments
    ///
    /// - `secret` - shared HS256 secret of the authentication provider
    /// - `audience` - expected `aud` claim, e.g. `authenticated`
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Resolves a raw token to the signed-in user.
    ///
    /// Returns `None` for a missing, malformed, expired or foreign token.
    /// That is an ordinary outcome for anonymous visitors, so it is only
    /// logged at debug level.
    pub fn current_user(&self, token: Option<&str>) -> Option<AuthUser> {
        let token = token?.trim();
        if token.is_empty() {
            return None;
        }

        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return None;
            }
        };

        match Uuid::parse_str(&claims.sub) {
            Ok(id) => Some(AuthUser {
                id,
                email: claims.email.filter(|e| !e.is_empty()),
            }),
            Err(_) => {
                tracing::debug!(sub = %claims.sub, "Session token subject is not a UUID");
                None
            }
        }
    }

    /// Like [`Self::current_user`] but fails when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token does not resolve to a user.
    pub fn require_user(&self, token: Option<&str>) -> Result<AuthUser, AppError> {
        self.current_user(token).ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Session token is missing, invalid or expired"}),
            )
        })
    }
}
