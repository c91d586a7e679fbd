//! View models for the public bio page.
//!
//! Everything here is pure: no I/O, no clock. Handlers load data through the
//! services and hand it to [`BioPageView::build`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Link, Page, Profile, Template};

const SITE_NAME: &str = "LinkHaven";

/// CSS class set for one page template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub card: &'static str,
    pub button: &'static str,
}

impl Theme {
    pub fn for_template(template: Template) -> Self {
        match template {
            Template::Creator => Theme {
                background: "bg-creator",
                card: "card card-creator",
                button: "btn btn-creator",
            },
            Template::Shop => Theme {
                background: "bg-shop",
                card: "card card-shop",
                button: "btn btn-shop",
            },
            Template::Coach => Theme {
                background: "bg-coach",
                card: "card card-coach",
                button: "btn btn-coach",
            },
        }
    }
}

/// One rendered link card.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCard {
    pub id: Uuid,
    pub title: String,
    /// Counted redirect for stored pages.
    pub href: String,
    pub glyph: &'static str,
}

impl LinkCard {
    fn from_link(link: &Link) -> Self {
        Self {
            id: link.id,
            title: link.title.clone(),
            href: format!("/link-click/{}", link.id),
            glyph: link.icon().glyph(),
        }
    }
}

/// `<head>` metadata for a rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub og_image: Option<String>,
}

impl PageMeta {
    pub fn for_page(page: &Page, profile: &Profile) -> Self {
        let name = match profile.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => page.username.clone(),
        };

        let description = match page.bio.as_deref().map(str::trim) {
            Some(bio) if !bio.is_empty() => bio.to_string(),
            _ => format!("Check out {}'s links on {}", page.username, SITE_NAME),
        };

        Self {
            title: format!("{} - {}", name, SITE_NAME),
            description,
            og_image: page.profile_image_url.clone(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            title: format!("Page Not Found - {}", SITE_NAME),
            description: "The page you're looking for doesn't exist.".to_string(),
            og_image: None,
        }
    }
}

/// Everything the bio page template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BioPageView {
    pub username: String,
    pub display_name: String,
    pub initial: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Theme,
    pub links: Vec<LinkCard>,
    pub show_footer: bool,
    pub meta: PageMeta,
}

impl BioPageView {
    /// Builds the view. Inactive links are dropped and the rest are shown in
    /// ascending sort position, whatever order they arrive in.
    pub fn build(page: &Page, profile: &Profile, links: &[Link]) -> Self {
        let mut visible: Vec<&Link> = links.iter().filter(|l| l.is_active).collect();
        visible.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
        });

        Self {
            username: page.username.clone(),
            display_name: profile.display_name(&page.username),
            initial: avatar_initial(profile.full_name.as_deref(), &page.username),
            bio: page.bio.clone().filter(|b| !b.trim().is_empty()),
            avatar_url: page.profile_image_url.clone(),
            theme: Theme::for_template(page.template),
            links: visible.into_iter().map(LinkCard::from_link).collect(),
            show_footer: !profile.is_premium,
            meta: PageMeta::for_page(page, profile),
        }
    }
}

/// Sample content for `/demo`: (title, url, icon tag).
const DEMO_LINKS: [(&str, &str, &str); 6] = [
    ("YouTube Channel", "https://youtube.com", "youtube"),
    ("Instagram", "https://instagram.com", "instagram"),
    ("LinkedIn", "https://linkedin.com", "linkedin"),
    ("My Website", "https://example.com", "globe"),
    ("Newsletter", "https://newsletter.com", "email"),
    ("GitHub", "https://github.com", "github"),
];

impl BioPageView {
    /// Showcase page rendered at `/demo`.
    ///
    /// Goes through [`BioPageView::build`] like a real page, but nothing is
    /// stored, so cards link straight to their destinations.
    pub fn demo() -> Self {
        let stamp = DateTime::<Utc>::MIN_UTC;
        let page = Page {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            username: "johndoe".to_string(),
            bio: Some(
                "Digital creator & entrepreneur sharing insights on tech, business, and \
                 lifestyle. Building the future, one link at a time. ✨"
                    .to_string(),
            ),
            template: Template::Creator,
            color_scheme: "default".to_string(),
            profile_image_url: None,
            created_at: stamp,
            updated_at: stamp,
        };
        let profile = Profile {
            id: Uuid::nil(),
            email: None,
            full_name: Some("John Doe".to_string()),
            is_premium: false,
            created_at: stamp,
            updated_at: stamp,
        };
        let links: Vec<Link> = DEMO_LINKS
            .iter()
            .zip(0..)
            .map(|(&(title, url, icon), position)| Link {
                id: Uuid::from_u128(position as u128 + 1),
                page_id: page.id,
                title: title.to_string(),
                url: url.to_string(),
                icon: Some(icon.to_string()),
                click_count: 0,
                sort_order: position,
                is_active: true,
                created_at: stamp,
                updated_at: stamp,
            })
            .collect();

        let mut view = Self::build(&page, &profile, &links);
        for card in &mut view.links {
            if let Some(link) = links.iter().find(|l| l.id == card.id) {
                card.href = link.url.clone();
            }
        }
        view
    }
}

fn avatar_initial(full_name: Option<&str>, username: &str) -> String {
    full_name
        .map(str::trim)
        .and_then(|n| n.chars().next())
        .or_else(|| username.chars().next())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}
