//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkWithClicks;

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// The destination URL. Stored verbatim; must be http or https.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,

    /// Optional caller-chosen short code.
    pub custom_alias: Option<String>,

    /// Optional expiry. After this instant the link answers 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request to partially update a link. The short code is immutable.
///
/// `expiresAt` distinguishes "absent" (keep the current value) from an
/// explicit `null` (clear the expiry) via the double `Option`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    pub original_url: Option<String>,

    #[serde(default, with = "serde_with::rust::double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

/// A short link as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_expired: bool,
}

impl LinkResponse {
    pub fn from_link(link: &Link, base_url: &str) -> Self {
        Self {
            id: link.id,
            code: link.code.clone(),
            original_url: link.original_url.clone(),
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), link.code),
            created_at: link.created_at,
            expires_at: link.expires_at,
            is_expired: link.is_expired(),
        }
    }
}

/// A list entry: the link plus its derived click count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkListItem {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub total_clicks: i64,
}

impl LinkListItem {
    pub fn from_link_with_clicks(item: &LinkWithClicks, base_url: &str) -> Self {
        Self {
            link: LinkResponse::from_link(&item.link, base_url),
            total_clicks: item.total_clicks,
        }
    }
}

/// Paginated listing of an owner's links.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLinksResponse {
    pub links: Vec<LinkListItem>,
    pub current_page: u32,
    pub total_pages: i64,
    pub total_links: i64,
}
