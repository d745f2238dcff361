//! Click entity representing a single redirect traversal.

use chrono::{DateTime, Utc};

/// A click event recorded when a short link is visited.
///
/// Created once at redirect time, never mutated, never deleted except by the
/// owning link's cascade. `ip_address` and `user_agent` are captured verbatim
/// from the request; `device_type`/`browser`/`os` are derived classifications
/// (see [`crate::utils::user_agent`]).
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
}

/// Input data for recording a new click event.
///
/// The timestamp is assigned by the storage layer at write time.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
}
