//! Pagination and search query parameters for link listing.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Query parameters for `GET /api/links`.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListLinksQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,

    /// Case-insensitive substring filter on the original URL or code.
    #[serde(default)]
    pub search: Option<String>,
}

impl ListLinksQuery {
    /// Validates the parameters and converts them to `(page, offset, limit)`.
    ///
    /// Defaults: page 1, limit 10. Limit is clamped to 1..=100 by
    /// validation, page must be positive.
    pub fn validate_and_get_offset_limit(&self) -> Result<(u32, i64, i64), String> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(10);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&limit) {
            return Err("Limit must be between 1 and 100".to_string());
        }

        // Widen before multiplying: page is user-controlled and u32 math
        // would overflow for very large page numbers.
        let offset = (i64::from(page) - 1) * i64::from(limit);

        Ok((page, offset, limit as i64))
    }

    /// The search filter, with empty strings treated as no filter.
    pub fn search_filter(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
