//! User entity owning links.

use chrono::{DateTime, Utc};

/// An account that creates links and views their analytics.
///
/// `email` is stored lowercase; `password_hash` is an Argon2id PHC string.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
