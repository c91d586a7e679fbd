//! Link management scoped to the caller's page.

use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkIcon, LinkPatch, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;

/// Maximum link title length in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Service for creating, editing and ordering links.
///
/// Every mutating call takes the caller's `page_id`. A link on another page
/// is reported as not found so that ids of other users' links are never
/// confirmed.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
}

fn link_not_found(link_id: Uuid) -> AppError {
    AppError::not_found("Link not found", json!({ "link_id": link_id }))
}

fn validate_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    let chars = title.chars().count();

    if chars == 0 || chars > MAX_TITLE_CHARS {
        return Err(AppError::bad_request(
            format!("Title must be 1-{MAX_TITLE_CHARS} characters"),
            json!({ "length": chars }),
        ));
    }

    Ok(title.to_string())
}

fn validate_url(url: &str) -> Result<String, AppError> {
    normalize_url(url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })
}

/// Blank means "no icon"; anything else must be a known tag.
fn validate_icon(icon: Option<String>) -> Result<Option<String>, AppError> {
    let Some(tag) = icon.map(|t| t.trim().to_ascii_lowercase()) else {
        return Ok(None);
    };
    if tag.is_empty() {
        return Ok(None);
    }

    match LinkIcon::from_tag(Some(tag.as_str())).tag() {
        Some(known) => Ok(Some(known.to_string())),
        None => Err(AppError::bad_request(
            "Unknown icon",
            json!({
                "icon": tag,
                "allowed": LinkIcon::SELECTABLE.iter().filter_map(|i| i.tag()).collect::<Vec<_>>(),
            }),
        )),
    }
}

impl LinkService {
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// All links of the page, active or not, in display order.
    pub async fn list_links(&self, page_id: Uuid) -> Result<Vec<Link>, AppError> {
        self.repository.list_by_page(page_id).await
    }

    /// Appends a link to the page.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty or overlong title, a
    /// non-HTTP(S) URL or an unknown icon tag.
    pub async fn create_link(&self, page_id: Uuid, new_link: NewLink) -> Result<Link, AppError> {
        let new_link = NewLink {
            title: validate_title(&new_link.title)?,
            url: validate_url(&new_link.url)?,
            icon: validate_icon(new_link.icon)?,
        };

        let link = self.repository.create(page_id, new_link).await?;
        tracing::info!(page_id = %page_id, link_id = %link.id, "Link created");

        Ok(link)
    }

    /// Loads a link and checks that it belongs to `page_id`.
    async fn owned_link(&self, page_id: Uuid, link_id: Uuid) -> Result<Link, AppError> {
        match self.repository.find_by_id(link_id).await? {
            Some(link) if link.page_id == page_id => Ok(link),
            _ => Err(link_not_found(link_id)),
        }
    }

    /// Applies a partial update. An empty patch returns the link unchanged.
    ///
    /// A new `sort_order` moves the link to that index (clamped to the end of
    /// the list) and renumbers the whole page, so positions stay distinct.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or on another page.
    /// Returns [`AppError::Validation`] for invalid field values.
    pub async fn update_link(
        &self,
        page_id: Uuid,
        link_id: Uuid,
        patch: LinkPatch,
    ) -> Result<Link, AppError> {
        let mut current = self.owned_link(page_id, link_id).await?;

        if patch.is_empty() {
            return Ok(current);
        }

        let target = match patch.sort_order {
            Some(pos) if pos < 0 => {
                return Err(AppError::bad_request(
                    "Position must not be negative",
                    json!({ "sort_order": pos }),
                ));
            }
            other => other,
        };

        let fields = LinkPatch {
            title: patch.title.as_deref().map(validate_title).transpose()?,
            url: patch.url.as_deref().map(validate_url).transpose()?,
            icon: patch.icon.map(validate_icon).transpose()?,
            sort_order: None,
        };

        if !fields.is_empty() {
            current = self
                .repository
                .update(link_id, fields)
                .await?
                .ok_or_else(|| link_not_found(link_id))?;
        }

        let Some(target) = target else {
            return Ok(current);
        };

        let mut order: Vec<Uuid> = self
            .repository
            .list_by_page(page_id)
            .await?
            .into_iter()
            .map(|l| l.id)
            .filter(|id| *id != link_id)
            .collect();
        let index = usize::try_from(target).unwrap_or(usize::MAX).min(order.len());
        order.insert(index, link_id);
        self.repository.reorder(page_id, order).await?;

        self.repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| link_not_found(link_id))
    }

    /// Shows or hides a link on the public page.
    pub async fn set_active(
        &self,
        page_id: Uuid,
        link_id: Uuid,
        is_active: bool,
    ) -> Result<Link, AppError> {
        self.owned_link(page_id, link_id).await?;

        self.repository
            .set_active(link_id, is_active)
            .await?
            .ok_or_else(|| link_not_found(link_id))
    }

    pub async fn delete_link(&self, page_id: Uuid, link_id: Uuid) -> Result<(), AppError> {
        self.owned_link(page_id, link_id).await?;

        if !self.repository.delete(link_id).await? {
            return Err(link_not_found(link_id));
        }

        tracing::info!(page_id = %page_id, link_id = %link_id, "Link deleted");
        Ok(())
    }

    /// Moves the listed links to the front in the given order.
    ///
    /// Links of the page that are not listed follow them in their current
    /// order. Every link of the page ends up with a distinct position
    /// `0..n`. Returns the page's links in the new order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the list is empty, has duplicates
    /// or names a link that is not on the page.
    pub async fn reorder_links(
        &self,
        page_id: Uuid,
        ordered_ids: Vec<Uuid>,
    ) -> Result<Vec<Link>, AppError> {
        if ordered_ids.is_empty() {
            return Err(AppError::bad_request("No link ids given", json!({})));
        }

        let mut seen = HashSet::with_capacity(ordered_ids.len());
        if let Some(dup) = ordered_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(AppError::bad_request(
                "Duplicate link id",
                json!({ "link_id": dup }),
            ));
        }

        let current: Vec<Uuid> = self
            .repository
            .list_by_page(page_id)
            .await?
            .into_iter()
            .map(|l| l.id)
            .collect();
        let owned: HashSet<Uuid> = current.iter().copied().collect();

        let foreign: Vec<Uuid> = ordered_ids
            .iter()
            .copied()
            .filter(|id| !owned.contains(id))
            .collect();
        if !foreign.is_empty() {
            return Err(AppError::bad_request(
                "Links do not belong to this page",
                json!({ "link_ids": foreign }),
            ));
        }

        let mut order = ordered_ids;
        order.extend(current.into_iter().filter(|id| !seen.contains(id)));

        self.repository.reorder(page_id, order).await?;
        self.repository.list_by_page(page_id).await
    }

    /// Resolves the destination of a public link click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for missing and for inactive links.
    pub async fn click_target(&self, link_id: Uuid) -> Result<Link, AppError> {
        match self.repository.find_by_id(link_id).await? {
            Some(link) if link.is_active => Ok(link),
            _ => Err(link_not_found(link_id)),
        }
    }
}
