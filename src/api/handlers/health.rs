//! Handler for the health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{ClickQueueHealth, HealthResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Reports service health: storage connectivity and click queue occupancy.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Errors
///
/// Returns 503 when the storage probe times out.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    state.link_service.ping().await?;

    let capacity = state.click_tx.max_capacity();
    let queued = capacity - state.click_tx.capacity();

    Ok(Json(HealthResponse {
        status: "ok",
        database: "ok",
        click_queue: ClickQueueHealth { queued, capacity },
    }))
}
