//! Profile entity: the account record owned by one authenticated identity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Account profile keyed by the identity provider's user id.
///
/// `is_premium` is only ever changed by the billing webhook; profile saves
/// from the dashboard never touch it.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Name shown on the public page: the full name, or `@username` when unset.
    pub fn display_name(&self, username: &str) -> String {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("@{}", username),
        }
    }
}

/// Fields written by an explicit profile save.
///
/// `email` is only applied when the stored profile has none.
#[derive(Debug, Clone)]
pub struct ProfileUpsert {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(full_name: Option<&str>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: Some("jane@example.com".to_string()),
            full_name: full_name.map(str::to_string),
            is_premium: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(profile(Some("Jane Doe")).display_name("jane"), "Jane Doe");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(profile(None).display_name("jane"), "@jane");
        assert_eq!(profile(Some("   ")).display_name("jane"), "@jane");
    }
}
