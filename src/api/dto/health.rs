//! DTO for the health check endpoint.

use serde::Serialize;

/// Health report covering storage and the click queue.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub click_queue: ClickQueueHealth,
}

/// Occupancy of the bounded click queue.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickQueueHealth {
    pub queued: usize,
    pub capacity: usize,
}
