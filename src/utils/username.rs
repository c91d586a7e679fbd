//! Username rules for public page addresses.
//!
//! A username becomes the first path segment of the public page
//! (`/{username}`), so it must be URL-safe and must not shadow an
//! application route.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use crate::error::AppError;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]{3,30}$").expect("valid username regex"));

/// Path segments owned by the application.
pub const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "api",
    "auth",
    "dashboard",
    "demo",
    "health",
    "link-click",
    "login",
    "logout",
    "signup",
    "static",
];

/// Trims and lowercases `input`, then checks it against the username rules.
///
/// Returns the canonical username.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the username has the wrong length or
/// characters, or is reserved.
pub fn validate_username(input: &str) -> Result<String, AppError> {
    let username = input.trim().to_ascii_lowercase();

    if !USERNAME_RE.is_match(&username) {
        return Err(AppError::bad_request(
            "Username must be 3-30 characters of a-z, 0-9, '_' or '-'",
            json!({ "username": username }),
        ));
    }

    if RESERVED_USERNAMES.contains(&username.as_str()) {
        return Err(AppError::bad_request(
            "Username is reserved",
            json!({ "username": username }),
        ));
    }

    Ok(username)
}
