//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// A link joined with its derived click count.
///
/// The count is always computed from stored events at read time. There is no
/// mutable click counter anywhere in the system, so concurrent recording
/// cannot lose updates.
#[derive(Debug, Clone)]
pub struct LinkWithClicks {
    pub link: Link,
    pub total_clicks: i64,
}

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// The short code's uniqueness is guaranteed by the storage layer's
    /// unique constraint, not by any prior existence check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasTaken`] if the code already exists; callers
    /// decide whether that is terminal (custom alias) or retryable
    /// (generated code). Returns [`AppError::Internal`] on other database
    /// errors and [`AppError::StorageTimeout`] if the operation exceeds the
    /// storage deadline.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Lists an owner's links newest-first with derived click counts.
    ///
    /// `search` filters by case-insensitive substring match on the original
    /// URL or the short code.
    async fn list_by_owner(
        &self,
        owner_id: i64,
        offset: i64,
        limit: i64,
        search: Option<String>,
    ) -> Result<Vec<LinkWithClicks>, AppError>;

    /// Counts an owner's links, honoring the same `search` filter as
    /// [`Self::list_by_owner`].
    async fn count_by_owner(&self, owner_id: i64, search: Option<String>)
    -> Result<i64, AppError>;

    /// Applies a partial update. `None` fields are unchanged; the short code
    /// is immutable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError>;

    /// Deletes a link. Associated click events are cascade-deleted.
    ///
    /// Returns `Ok(true)` if a link was deleted, `Ok(false)` if none matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Storage connectivity probe for health checks.
    async fn ping(&self) -> Result<(), AppError>;
}
