//! Page entity: a user's public bio page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Visual preset applied to a page's public render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Creator,
    Shop,
    Coach,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Creator, Template::Shop, Template::Coach];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Creator => "creator",
            Template::Shop => "shop",
            Template::Coach => "coach",
        }
    }

    /// Human-readable description used by the profile form.
    pub fn description(&self) -> &'static str {
        match self {
            Template::Creator => "Creator - Perfect for content creators",
            Template::Shop => "Shop - Great for businesses and stores",
            Template::Coach => "Coach - Ideal for coaches and consultants",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown template: {0}")]
pub struct UnknownTemplate(pub String);

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(Template::Creator),
            "shop" => Ok(Template::Shop),
            "coach" => Ok(Template::Coach),
            other => Err(UnknownTemplate(other.to_string())),
        }
    }
}

/// A user's public bio page. Exactly one per owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub template: Template,
    pub color_scheme: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create-or-update input for the owner's page.
///
/// Keyed by `user_id`; the storage layer guarantees a single row per owner.
#[derive(Debug, Clone)]
pub struct PageUpsert {
    pub user_id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub template: Template,
    pub color_scheme: String,
    pub profile_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parse() {
        assert_eq!("creator".parse::<Template>().unwrap(), Template::Creator);
        assert_eq!("shop".parse::<Template>().unwrap(), Template::Shop);
        assert_eq!("coach".parse::<Template>().unwrap(), Template::Coach);
        assert!("premium".parse::<Template>().is_err());
        assert!("Creator".parse::<Template>().is_err());
    }

    #[test]
    fn test_template_default_is_creator() {
        assert_eq!(Template::default(), Template::Creator);
    }

    #[test]
    fn test_template_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Template::Shop).unwrap(), "\"shop\"");
        let parsed: Template = serde_json::from_str("\"coach\"").unwrap();
        assert_eq!(parsed, Template::Coach);
    }
}
