//! Handler for the link analytics endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click analytics summary for one of the user's links.
///
/// # Endpoint
///
/// `GET /api/links/{id}/analytics`
///
/// Aggregates are computed from the stored click events at request time:
/// total clicks, a per-day time series, and device/browser/OS breakdowns.
///
/// # Errors
///
/// Returns 404 for an unknown id (including a deleted link) and 403 when
/// the link belongs to someone else.
pub async fn link_analytics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let analytics = state.stats_service.link_analytics(id, user.id).await?;

    Ok(Json(analytics.into()))
}
