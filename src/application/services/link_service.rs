//! Link creation, resolution, and management service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::domain::repositories::{LinkRepository, LinkWithClicks};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_alias};
use crate::utils::url_validator::validate_url;

/// Maximum generate-then-insert attempts before giving up.
///
/// With 62^6 possible codes a collision is astronomically unlikely; the
/// bound exists so a pathological state fails loudly instead of looping.
const MAX_GENERATE_ATTEMPTS: usize = 5;

/// Service for creating, resolving, and managing short links.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Creates a short link for `owner_id`.
    ///
    /// # Code Assignment
    ///
    /// - A custom alias is validated, pre-checked for a friendly error, and
    ///   used exactly as given. A collision — whether caught by the
    ///   pre-check or by the unique constraint losing a race — is a
    ///   terminal [`AppError::AliasTaken`]; custom aliases are never
    ///   retried.
    /// - Without an alias, a 6-character code is generated and inserted
    ///   directly; a unique violation means another writer got the code
    ///   first and a fresh code is tried, up to [`MAX_GENERATE_ATTEMPTS`]
    ///   times before [`AppError::ExhaustedRetries`]. There is no pre-check
    ///   and no lock: the store's unique constraint is the sole correctness
    ///   mechanism, so concurrent creations never serialize.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or alias.
    pub async fn create_link(
        &self,
        owner_id: i64,
        original_url: String,
        custom_alias: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        validate_url(&original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(alias) = custom_alias {
            validate_custom_alias(&alias)?;

            // Friendly pre-check; the unique constraint still catches races.
            if self.links.find_by_code(&alias).await?.is_some() {
                return Err(AppError::alias_taken(
                    "Custom alias already in use",
                    json!({ "alias": alias }),
                ));
            }

            return self
                .links
                .create(NewLink {
                    code: alias,
                    original_url,
                    owner_id,
                    expires_at,
                })
                .await;
        }

        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let code = generate_code();

            match self
                .links
                .create(NewLink {
                    code,
                    original_url: original_url.clone(),
                    owner_id,
                    expires_at,
                })
                .await
            {
                Ok(link) => return Ok(link),
                // Another writer inserted this code first; generate a new one.
                Err(AppError::AliasTaken { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::exhausted_retries(
            "Failed to generate a unique short code",
            json!({ "attempts": MAX_GENERATE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its link for redirecting.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Expired`] when `expires_at` has passed — an expired link
    /// is distinguishable from a missing one (410 vs 404 at the boundary).
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let link = self.links.find_by_code(code).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })?;

        if link.is_expired() {
            return Err(AppError::expired(
                "Short link has expired",
                json!({ "code": code }),
            ));
        }

        Ok(link)
    }

    /// Lists an owner's links newest-first with derived click counts.
    ///
    /// Returns the page of links and the total matching count.
    pub async fn list_links(
        &self,
        owner_id: i64,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<(Vec<LinkWithClicks>, i64), AppError> {
        let links = self
            .links
            .list_by_owner(owner_id, offset, limit, search.clone())
            .await?;
        let total = self.links.count_by_owner(owner_id, search).await?;

        Ok((links, total))
    }

    /// Updates a link's destination URL and/or expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist,
    /// [`AppError::Forbidden`] if `owner_id` does not own it, and
    /// [`AppError::Validation`] for a malformed replacement URL.
    pub async fn update_link(
        &self,
        id: i64,
        owner_id: i64,
        update: LinkUpdate,
    ) -> Result<Link, AppError> {
        if let Some(url) = &update.original_url {
            validate_url(url).map_err(|e| {
                AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
            })?;
        }

        self.find_owned(id, owner_id).await?;

        self.links.update(id, update).await
    }

    /// Deletes a link and, by cascade, all of its click events.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] / [`AppError::Forbidden`] under the
    /// same ownership rules as [`Self::update_link`].
    pub async fn delete_link(&self, id: i64, owner_id: i64) -> Result<(), AppError> {
        self.find_owned(id, owner_id).await?;

        self.links.delete(id).await?;
        Ok(())
    }

    /// Storage connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.links.ping().await
    }

    /// Loads a link and enforces ownership.
    async fn find_owned(&self, id: i64, owner_id: i64) -> Result<Link, AppError> {
        let link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if !link.is_owned_by(owner_id) {
            return Err(AppError::forbidden(
                "You do not own this link",
                json!({ "id": id }),
            ));
        }

        Ok(link)
    }
}
