//! Link entity: one outbound URL shown on a page.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Closed set of icons a link can carry.
///
/// Tags are stored as plain text; anything unrecognised (including a missing
/// tag) maps to [`LinkIcon::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkIcon {
    Globe,
    Twitter,
    Instagram,
    Linkedin,
    Youtube,
    Tiktok,
    Facebook,
    Github,
    Email,
    Phone,
    Whatsapp,
    Telegram,
    Linkhaven,
    #[default]
    Default,
}

impl LinkIcon {
    /// Icons offered by the link form, in display order.
    pub const SELECTABLE: [LinkIcon; 12] = [
        LinkIcon::Globe,
        LinkIcon::Twitter,
        LinkIcon::Instagram,
        LinkIcon::Linkedin,
        LinkIcon::Youtube,
        LinkIcon::Tiktok,
        LinkIcon::Facebook,
        LinkIcon::Github,
        LinkIcon::Email,
        LinkIcon::Phone,
        LinkIcon::Whatsapp,
        LinkIcon::Telegram,
    ];

    /// Parses a stored tag. Never fails.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("globe") => LinkIcon::Globe,
            Some("twitter") => LinkIcon::Twitter,
            Some("instagram") => LinkIcon::Instagram,
            Some("linkedin") => LinkIcon::Linkedin,
            Some("youtube") => LinkIcon::Youtube,
            Some("tiktok") => LinkIcon::Tiktok,
            Some("facebook") => LinkIcon::Facebook,
            Some("github") => LinkIcon::Github,
            Some("email") => LinkIcon::Email,
            Some("phone") => LinkIcon::Phone,
            Some("whatsapp") => LinkIcon::Whatsapp,
            Some("telegram") => LinkIcon::Telegram,
            Some("linkhaven") => LinkIcon::Linkhaven,
            _ => LinkIcon::Default,
        }
    }

    /// Storage tag, `None` for the default icon.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            LinkIcon::Globe => Some("globe"),
            LinkIcon::Twitter => Some("twitter"),
            LinkIcon::Instagram => Some("instagram"),
            LinkIcon::Linkedin => Some("linkedin"),
            LinkIcon::Youtube => Some("youtube"),
            LinkIcon::Tiktok => Some("tiktok"),
            LinkIcon::Facebook => Some("facebook"),
            LinkIcon::Github => Some("github"),
            LinkIcon::Email => Some("email"),
            LinkIcon::Phone => Some("phone"),
            LinkIcon::Whatsapp => Some("whatsapp"),
            LinkIcon::Telegram => Some("telegram"),
            LinkIcon::Linkhaven => Some("linkhaven"),
            LinkIcon::Default => None,
        }
    }

    /// Emoji shown on the public bio page.
    pub fn glyph(&self) -> &'static str {
        match self {
            LinkIcon::Globe => "🌐",
            LinkIcon::Twitter => "🐦",
            LinkIcon::Instagram => "📷",
            LinkIcon::Linkedin => "💼",
            LinkIcon::Youtube => "📺",
            LinkIcon::Tiktok => "🎵",
            LinkIcon::Facebook => "📘",
            LinkIcon::Github => "💻",
            LinkIcon::Email => "✉️",
            LinkIcon::Phone => "📞",
            LinkIcon::Whatsapp => "💬",
            LinkIcon::Telegram => "✈️",
            LinkIcon::Linkhaven | LinkIcon::Default => "🔗",
        }
    }

    /// Brand color used by the dashboard link list.
    pub fn color(&self) -> &'static str {
        match self {
            LinkIcon::Twitter => "#1DA1F2",
            LinkIcon::Instagram => "#E4405F",
            LinkIcon::Linkedin => "#0077B5",
            LinkIcon::Youtube => "#FF0000",
            LinkIcon::Tiktok => "#000000",
            LinkIcon::Facebook => "#1877F2",
            LinkIcon::Github => "#181717",
            LinkIcon::Whatsapp => "#25D366",
            LinkIcon::Telegram => "#0088CC",
            LinkIcon::Email => "#EA4335",
            LinkIcon::Phone => "#34A853",
            LinkIcon::Globe => "#4285F4",
            LinkIcon::Linkhaven => "#6366F1",
            LinkIcon::Default => "#6B7280",
        }
    }

    /// Label used in the icon picker.
    pub fn label(&self) -> &'static str {
        match self {
            LinkIcon::Globe => "Website",
            LinkIcon::Twitter => "Twitter",
            LinkIcon::Instagram => "Instagram",
            LinkIcon::Linkedin => "LinkedIn",
            LinkIcon::Youtube => "YouTube",
            LinkIcon::Tiktok => "TikTok",
            LinkIcon::Facebook => "Facebook",
            LinkIcon::Github => "GitHub",
            LinkIcon::Email => "Email",
            LinkIcon::Phone => "Phone",
            LinkIcon::Whatsapp => "WhatsApp",
            LinkIcon::Telegram => "Telegram",
            LinkIcon::Linkhaven => "LinkHaven",
            LinkIcon::Default => "No icon",
        }
    }
}

/// An outbound link belonging to exactly one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: Uuid,
    pub page_id: Uuid,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub click_count: i64,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    pub fn icon(&self) -> LinkIcon {
        LinkIcon::from_tag(self.icon.as_deref())
    }
}

/// Input data for creating a new link. `sort_order` is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
}

/// Partial update for an existing link.
///
/// `None` fields are left unchanged.
/// `icon: Some(None)` clears the icon; `Some(Some(tag))` sets it.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<Option<String>>,
    pub sort_order: Option<i32>,
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.icon.is_none()
            && self.sort_order.is_none()
    }
}
