//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod analytics;
pub mod checkout;
pub mod health;
pub mod page;
pub mod profile;
pub mod update_link;
