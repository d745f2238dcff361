//! PostgreSQL repository implementations.
//!
//! Every storage call runs under a deadline so a stalled database turns into
//! a fast 503 instead of a hung request.

pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs a storage operation under `deadline`, mapping elapsed time to
/// [`AppError::StorageTimeout`].
pub(crate) async fn with_deadline<T>(
    operation: &'static str,
    deadline: Duration,
    fut: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::storage_timeout(
            "Storage operation timed out",
            json!({
                "operation": operation,
                "timeout_ms": deadline.as_millis() as u64,
            }),
        )),
    }
}
