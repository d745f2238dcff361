//! DTOs for the link analytics endpoint.

use chrono::NaiveDate;
use serde::Serialize;

use crate::application::services::stats_service::LinkAnalytics;

/// Clicks on one calendar date (UTC). `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCountDto {
    pub date: NaiveDate,
    pub count: i64,
}

/// Clicks for one categorical value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCountDto {
    pub name: String,
    pub count: i64,
}

/// Analytics summary for a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_clicks: i64,
    pub clicks_over_time: Vec<DateCountDto>,
    pub device_breakdown: Vec<CategoryCountDto>,
    pub browser_breakdown: Vec<CategoryCountDto>,
    pub os_breakdown: Vec<CategoryCountDto>,
}

impl From<LinkAnalytics> for AnalyticsResponse {
    fn from(analytics: LinkAnalytics) -> Self {
        let categories = |counts: Vec<crate::application::services::stats_service::CategoryCount>| {
            counts
                .into_iter()
                .map(|c| CategoryCountDto {
                    name: c.name,
                    count: c.count,
                })
                .collect()
        };

        Self {
            total_clicks: analytics.total_clicks,
            clicks_over_time: analytics
                .clicks_over_time
                .into_iter()
                .map(|d| DateCountDto {
                    date: d.date,
                    count: d.count,
                })
                .collect(),
            device_breakdown: categories(analytics.device_breakdown),
            browser_breakdown: categories(analytics.browser_breakdown),
            os_breakdown: categories(analytics.os_breakdown),
        }
    }
}
