//! Validation and canonicalization of link destination URLs.

use url::Url;

/// Longest destination URL accepted for a link.
pub const MAX_URL_LEN: usize = 2048;

/// Reasons a link URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL is longer than {MAX_URL_LEN} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses a user-supplied link URL and returns its canonical string.
///
/// Surrounding whitespace is trimmed. The `url` parser already lowercases the
/// host and drops default ports for `http`/`https`; paths, queries and
/// fragments are kept because a bio link may point at an anchor.
///
/// # Errors
///
/// Any [`UrlNormalizationError`] variant. `javascript:`, `data:`, `mailto:`
/// and every other non-HTTP scheme yield [`UrlNormalizationError::UnsupportedProtocol`].
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }
    if trimmed.len() > MAX_URL_LEN {
        return Err(UrlNormalizationError::TooLong);
    }

    let url =
        Url::parse(trimmed).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url.into()),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}
