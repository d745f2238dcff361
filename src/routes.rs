//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`  - Short link redirect (public)
//! - `GET  /health`  - Health check: DB and click queue (public)
//! - `/api/auth/*`   - Registration and login (public)
//! - `/api/links*`   - Link management (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (proxy-aware when configured)
//! - **Authentication** - Bearer token on link routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads the client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket
///   address; enable only behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let api_protected = rate_limit::secure(api_protected, behind_proxy);

    let api_public = rate_limit::public(api::routes::public_routes(), behind_proxy);

    let api_router = Router::new().merge(api_public).merge(api_protected);

    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
