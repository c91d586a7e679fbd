//! Utility functions for input validation and request handling.
//!
//! - [`url_normalizer`] - Link destination URL validation
//! - [`username`] - Username format and reserved words
//! - [`cookies`] - Session cookie extraction
//! - [`db_error`] - Database error classification

pub mod cookies;
pub mod db_error;
pub mod url_normalizer;
pub mod username;
