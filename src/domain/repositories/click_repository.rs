//! Repository trait for the append-only click event log.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click events.
///
/// Events are append-only and independent: recording is safe to run
/// concurrently for the same link with no coordination, and aggregate counts
/// are always derived by counting events.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click event; the timestamp is set at write time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors and
    /// [`AppError::StorageTimeout`] past the storage deadline. Callers on the
    /// redirect path absorb all errors.
    async fn record(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Loads all events for a link ordered by `clicked_at` ascending.
    async fn list_for_link(&self, link_id: i64) -> Result<Vec<Click>, AppError>;
}
