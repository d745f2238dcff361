//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with metadata.
///
/// `code` is globally unique and immutable once assigned. `original_url` is
/// stored exactly as submitted at creation. Expiry is soft state computed
/// from `expires_at`, never a stored flag.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        owner_id: i64,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            owner_id,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true if `user_id` owns this link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub owner_id: i64,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update for an existing link.
///
/// Only the destination URL and expiry are mutable; the short code never
/// changes after assignment.
///
/// `None` fields are left unchanged. `expires_at: Some(None)` clears the
/// expiry; `Some(Some(t))` sets it.
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub original_url: Option<String>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}
