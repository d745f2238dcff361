//! Click analytics aggregation service.
//!
//! Summaries are always computed from the raw event log. Nothing here is
//! cached and no counter is ever stored: the event log is the single source
//! of truth, which keeps concurrent recording race-free.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::entities::Click;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Click count for one UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Click count for one categorical value (device, browser, or OS).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

/// Aggregated analytics for one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnalytics {
    pub total_clicks: i64,
    /// One entry per distinct UTC date with at least one click,
    /// chronologically ascending. Days without clicks are absent.
    pub clicks_over_time: Vec<DateCount>,
    pub device_breakdown: Vec<CategoryCount>,
    pub browser_breakdown: Vec<CategoryCount>,
    pub os_breakdown: Vec<CategoryCount>,
}

/// Service for computing per-link click analytics.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Computes the analytics summary for a link owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist (including
    /// after deletion, since events cascade away with their link) and
    /// [`AppError::Forbidden`] if `owner_id` does not own it.
    pub async fn link_analytics(
        &self,
        link_id: i64,
        owner_id: i64,
    ) -> Result<LinkAnalytics, AppError> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))?;

        if !link.is_owned_by(owner_id) {
            return Err(AppError::forbidden(
                "You do not own this link",
                json!({ "id": link_id }),
            ));
        }

        let clicks = self.clicks.list_for_link(link_id).await?;

        Ok(summarize(&clicks))
    }
}

/// Reduces an event log to its analytics summary.
///
/// Pure and deterministic: breakdowns come out sorted by category name, the
/// time series by date. Expects `clicks` ordered by timestamp ascending (the
/// repository contract), though only the date grouping relies on it.
pub fn summarize(clicks: &[Click]) -> LinkAnalytics {
    let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut by_device: BTreeMap<&str, i64> = BTreeMap::new();
    let mut by_browser: BTreeMap<&str, i64> = BTreeMap::new();
    let mut by_os: BTreeMap<&str, i64> = BTreeMap::new();

    for click in clicks {
        *by_date.entry(click.clicked_at.date_naive()).or_insert(0) += 1;
        *by_device.entry(&click.device_type).or_insert(0) += 1;
        *by_browser.entry(&click.browser).or_insert(0) += 1;
        *by_os.entry(&click.os).or_insert(0) += 1;
    }

    let to_categories = |map: BTreeMap<&str, i64>| {
        map.into_iter()
            .map(|(name, count)| CategoryCount {
                name: name.to_string(),
                count,
            })
            .collect()
    };

    LinkAnalytics {
        total_clicks: clicks.len() as i64,
        clicks_over_time: by_date
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect(),
        device_breakdown: to_categories(by_device),
        browser_breakdown: to_categories(by_browser),
        os_breakdown: to_categories(by_os),
    }
}
