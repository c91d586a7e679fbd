//! Cookie header helpers.

use axum::http::{HeaderMap, header::COOKIE};

/// Returns the value of cookie `name`, if present and non-empty.
///
/// Every `Cookie` header is inspected; pairs are split on `;` and only the
/// first `=` separates name from value.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}
