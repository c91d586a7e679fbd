//! Repository trait for account profiles.

use crate::domain::entities::{Profile, ProfileUpsert};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for user profiles.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds a profile by identity id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Profile))` if found
    /// - `Ok(None)` if the user has never saved a profile
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Inserts or updates a profile by primary key.
    ///
    /// `full_name` is always written. `email` only fills an empty column.
    /// `is_premium` is never modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, profile: ProfileUpsert) -> Result<Profile, AppError>;

    /// Inserts an empty profile for `id` unless one exists, then returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_if_missing(&self, id: Uuid, email: Option<String>)
    -> Result<Profile, AppError>;

    /// Sets the premium flag of exactly one profile.
    ///
    /// Returns `Ok(false)` when no profile has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_premium(&self, id: Uuid, is_premium: bool) -> Result<bool, AppError>;

    /// Round-trips the backing store. Used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}
