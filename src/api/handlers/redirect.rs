//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `302 Found` so clients keep re-resolving and every visit
/// is observed. The click event is pushed onto the bounded queue with a
/// non-blocking send after the lookup succeeds; if the queue is full the
/// event is dropped and the redirect is unaffected. Recording never sits
/// on the response path.
///
/// # Errors
///
/// Returns 404 for an unknown code and 410 for an expired link (expired
/// links record no clicks).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    let event = ClickEvent::new(
        link.id,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    if state.click_tx.try_send(event).is_err() {
        debug!(code = %code, "click queue full, dropping event");
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, link.original_url)]))
}
