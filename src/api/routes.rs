//! API route configuration.
//!
//! Auth endpoints are public; everything else requires a Bearer token via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, link_analytics_handler, list_links_handler,
    login_handler, register_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Public API routes (no authentication).
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account, returns profile + token
/// - `POST /auth/login`    - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Link management routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /links`                 - Create a short link
/// - `GET    /links`                 - List own links (paginated, searchable)
/// - `PUT    /links/{id}`            - Update destination URL and/or expiry
/// - `DELETE /links/{id}`            - Delete a link and its click events
/// - `GET    /links/{id}/analytics`  - Click analytics summary
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route(
            "/links/{id}",
            put(update_link_handler).delete(delete_link_handler),
        )
        .route("/links/{id}/analytics", get(link_analytics_handler))
}
