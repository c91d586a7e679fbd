//! Profile and page management plus the public page read model.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{AuthUser, Link, Page, PageUpsert, Profile, ProfileUpsert, Template};
use crate::domain::repositories::{LinkRepository, PageRepository, ProfileRepository};
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;
use crate::utils::username::validate_username;

/// Default value of `pages.color_scheme`.
pub const DEFAULT_COLOR_SCHEME: &str = "default";

/// Editable page fields submitted by the owner.
///
/// `template` and `color_scheme` keep their stored value (or the default for
/// a new page) when `None`.
#[derive(Debug, Clone, Default)]
pub struct PageInput {
    pub username: String,
    pub bio: Option<String>,
    pub template: Option<Template>,
    pub color_scheme: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Everything the public bio page needs in one value.
#[derive(Debug, Clone)]
pub struct PublicPage {
    pub page: Page,
    pub profile: Profile,
    /// Active links in ascending `sort_order`.
    pub links: Vec<Link>,
}

/// Service for profiles and pages.
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    pages: Arc<dyn PageRepository>,
    links: Arc<dyn LinkRepository>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProfileService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        pages: Arc<dyn PageRepository>,
        links: Arc<dyn LinkRepository>,
    ) -> Self {
        Self {
            profiles,
            pages,
            links,
        }
    }

    /// Returns the profile, or `None` before the first save.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        self.profiles.find_by_id(user_id).await
    }

    /// Returns the user's page, or `None` if the user has not onboarded.
    pub async fn get_page(&self, user_id: Uuid) -> Result<Option<Page>, AppError> {
        self.pages.find_by_user(user_id).await
    }

    /// Returns the user's page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no page yet.
    pub async fn require_page(&self, user_id: Uuid) -> Result<Page, AppError> {
        self.pages.find_by_user(user_id).await?.ok_or_else(|| {
            AppError::not_found(
                "No page yet",
                json!({ "hint": "Create your page first" }),
            )
        })
    }

    pub async fn get_page_by_username(&self, username: &str) -> Result<Option<Page>, AppError> {
        self.pages
            .find_by_username(&username.trim().to_ascii_lowercase())
            .await
    }

    /// Saves the display name. The email from the session only fills a
    /// profile that has none; the premium flag is never touched.
    pub async fn upsert_profile(
        &self,
        user: &AuthUser,
        full_name: Option<String>,
    ) -> Result<Profile, AppError> {
        let upsert = ProfileUpsert {
            id: user.id,
            email: user.email.clone(),
            full_name: blank_to_none(full_name),
        };

        let profile = self.profiles.upsert(upsert).await?;
        tracing::info!(user_id = %user.id, "Profile saved");

        Ok(profile)
    }

    /// Creates or updates the caller's page.
    ///
    /// The owner's profile row is created first when missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad username or avatar URL.
    /// Returns [`AppError::Conflict`] if another page owns the username.
    pub async fn upsert_page(&self, user: &AuthUser, input: PageInput) -> Result<Page, AppError> {
        let username = validate_username(&input.username)?;

        let profile_image_url = blank_to_none(input.profile_image_url)
            .map(|url| {
                normalize_url(&url).map_err(|e| {
                    AppError::bad_request(
                        "Invalid profile image URL",
                        json!({ "reason": e.to_string() }),
                    )
                })
            })
            .transpose()?;

        let existing = self.pages.find_by_user(user.id).await?;

        let template = input
            .template
            .or(existing.as_ref().map(|p| p.template))
            .unwrap_or_default();

        let color_scheme = blank_to_none(input.color_scheme)
            .or_else(|| existing.as_ref().map(|p| p.color_scheme.clone()))
            .unwrap_or_else(|| DEFAULT_COLOR_SCHEME.to_string());

        self.profiles
            .create_if_missing(user.id, user.email.clone())
            .await?;

        let page = self
            .pages
            .upsert(PageUpsert {
                user_id: user.id,
                username,
                bio: blank_to_none(input.bio),
                template,
                color_scheme,
                profile_image_url,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            page_id = %page.id,
            username = %page.username,
            created = existing.is_none(),
            "Page saved"
        );

        Ok(page)
    }

    /// Loads a public page with its owner and active links.
    ///
    /// Returns `None` when either the page or its owner's profile is missing.
    pub async fn public_page(&self, username: &str) -> Result<Option<PublicPage>, AppError> {
        let Some(page) = self.get_page_by_username(username).await? else {
            return Ok(None);
        };

        let Some(profile) = self.profiles.find_by_id(page.user_id).await? else {
            tracing::warn!(page_id = %page.id, "Page owner has no profile");
            return Ok(None);
        };

        let links = self.links.list_active_by_page(page.id).await?;

        Ok(Some(PublicPage {
            page,
            profile,
            links,
        }))
    }

    /// Checks database connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.profiles.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockLinkRepository, MockPageRepository, MockProfileRepository,
    };
    use chrono::Utc;

    fn user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: Some("alice@example.com".to_string()),
        }
    }

    fn profile(id: Uuid) -> Profile {
        Profile {
            id,
            email: Some("alice@example.com".to_string()),
            full_name: Some("Alice".to_string()),
            is_premium: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn page(user_id: Uuid, username: &str) -> Page {
        Page {
            id: Uuid::new_v4(),
            user_id,
            username: username.to_string(),
            bio: None,
            template: Template::Shop,
            color_scheme: "ocean".to_string(),
            profile_image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn page_from(upsert: PageUpsert) -> Page {
        Page {
            id: Uuid::new_v4(),
            user_id: upsert.user_id,
            username: upsert.username,
            bio: upsert.bio,
            template: upsert.template,
            color_scheme: upsert.color_scheme,
            profile_image_url: upsert.profile_image_url,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(
        profiles: MockProfileRepository,
        pages: MockPageRepository,
        links: MockLinkRepository,
    ) -> ProfileService {
        ProfileService::new(Arc::new(profiles), Arc::new(pages), Arc::new(links))
    }

    #[tokio::test]
    async fn test_require_page_not_found() {
        let mut pages = MockPageRepository::new();
        pages.expect_find_by_user().returning(|_| Ok(None));

        let svc = service(MockProfileRepository::new(), pages, MockLinkRepository::new());

        let err = svc.require_page(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_upsert_page_creates_profile_first_and_defaults() {
        let user = user();
        let user_id = user.id;

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_create_if_missing()
            .withf(move |id, email| *id == user_id && email.as_deref() == Some("alice@example.com"))
            .times(1)
            .returning(|id, _| Ok(profile(id)));

        let mut pages = MockPageRepository::new();
        pages.expect_find_by_user().returning(|_| Ok(None));
        pages
            .expect_upsert()
            .withf(|p| {
                p.username == "alice"
                    && p.template == Template::Creator
                    && p.color_scheme == DEFAULT_COLOR_SCHEME
                    && p.bio.is_none()
            })
            .times(1)
            .returning(|p| Ok(page_from(p)));

        let svc = service(profiles, pages, MockLinkRepository::new());

        let page = svc
            .upsert_page(
                &user,
                PageInput {
                    username: " Alice ".to_string(),
                    bio: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(page.username, "alice");
    }

    #[tokio::test]
    async fn test_upsert_page_keeps_existing_template() {
        let user = user();

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_create_if_missing()
            .returning(|id, _| Ok(profile(id)));

        let mut pages = MockPageRepository::new();
        pages
            .expect_find_by_user()
            .returning(|id| Ok(Some(page(id, "alice"))));
        pages
            .expect_upsert()
            .withf(|p| p.template == Template::Shop && p.color_scheme == "ocean")
            .times(1)
            .returning(|p| Ok(page_from(p)));

        let svc = service(profiles, pages, MockLinkRepository::new());

        let result = svc
            .upsert_page(
                &user,
                PageInput {
                    username: "alice".to_string(),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_upsert_page_rejects_reserved_username() {
        let mut pages = MockPageRepository::new();
        pages.expect_upsert().times(0);

        let svc = service(MockProfileRepository::new(), pages, MockLinkRepository::new());

        let result = svc
            .upsert_page(
                &user(),
                PageInput {
                    username: "dashboard".to_string(),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_upsert_page_rejects_bad_image_url() {
        let svc = service(
            MockProfileRepository::new(),
            MockPageRepository::new(),
            MockLinkRepository::new(),
        );

        let result = svc
            .upsert_page(
                &user(),
                PageInput {
                    username: "alice".to_string(),
                    profile_image_url: Some("javascript:alert(1)".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_upsert_page_propagates_conflict() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_create_if_missing()
            .returning(|id, _| Ok(profile(id)));

        let mut pages = MockPageRepository::new();
        pages.expect_find_by_user().returning(|_| Ok(None));
        pages.expect_upsert().returning(|p| {
            Err(AppError::conflict(
                "Username already taken",
                json!({ "username": p.username }),
            ))
        });

        let svc = service(profiles, pages, MockLinkRepository::new());

        let result = svc
            .upsert_page(
                &user(),
                PageInput {
                    username: "taken".to_string(),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_upsert_profile_blank_name_cleared() {
        let user = user();

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_upsert()
            .withf(|p| p.full_name.is_none() && p.email.is_some())
            .times(1)
            .returning(|p| Ok(profile(p.id)));

        let svc = service(profiles, MockPageRepository::new(), MockLinkRepository::new());

        assert!(svc.upsert_profile(&user, Some("  ".to_string())).await.is_ok());
    }

    #[tokio::test]
    async fn test_public_page_missing_profile_is_none() {
        let mut pages = MockPageRepository::new();
        pages
            .expect_find_by_username()
            .withf(|u| u == "alice")
            .returning(|u| Ok(Some(page(Uuid::new_v4(), u))));

        let mut profiles = MockProfileRepository::new();
        profiles.expect_find_by_id().returning(|_| Ok(None));

        let mut links = MockLinkRepository::new();
        links.expect_list_active_by_page().times(0);

        let svc = service(profiles, pages, links);

        assert!(svc.public_page("Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_public_page_loads_active_links() {
        let mut pages = MockPageRepository::new();
        pages
            .expect_find_by_username()
            .returning(|u| Ok(Some(page(Uuid::new_v4(), u))));

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_id()
            .returning(|id| Ok(Some(profile(id))));

        let mut links = MockLinkRepository::new();
        links
            .expect_list_active_by_page()
            .times(1)
            .returning(|_| Ok(vec![]));

        let svc = service(profiles, pages, links);

        let public = svc.public_page("alice").await.unwrap().unwrap();
        assert_eq!(public.page.username, "alice");
        assert!(public.links.is_empty());
    }
}
