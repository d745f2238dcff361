//! Repository trait for account storage.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username or email is already
    /// registered (unique violation); [`AppError::Internal`] on other
    /// database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by email (stored lowercase).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}
