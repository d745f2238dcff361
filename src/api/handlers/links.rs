//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, LinkListItem, LinkResponse, ListLinksResponse, UpdateLinkRequest,
};
use crate::api::dto::pagination::ListLinksQuery;
use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::LinkUpdate;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for the authenticated user.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Errors
///
/// Returns 400 for an invalid URL or alias, and 400 with code `alias_taken`
/// when the requested custom alias already exists.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(
            user.id,
            payload.original_url,
            payload.custom_alias,
            payload.expires_at,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(&link, &state.base_url)),
    ))
}

/// Lists the authenticated user's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=&limit=&search=`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<ListLinksResponse>, AppError> {
    let (page, offset, limit) = query
        .validate_and_get_offset_limit()
        .map_err(|message| AppError::bad_request(message, json!({})))?;

    let (items, total_links) = state
        .link_service
        .list_links(user.id, offset, limit, query.search_filter())
        .await?;

    let links = items
        .iter()
        .map(|item| LinkListItem::from_link_with_clicks(item, &state.base_url))
        .collect();

    Ok(Json(ListLinksResponse {
        links,
        current_page: page,
        total_pages: (total_links + limit - 1) / limit,
        total_links,
    }))
}

/// Partially updates a link owned by the authenticated user.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// # Errors
///
/// Returns 404 for an unknown id and 403 when the link belongs to someone
/// else.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let update = LinkUpdate {
        original_url: payload.original_url,
        expires_at: payload.expires_at,
    };

    let link = state.link_service.update_link(id, user.id, update).await?;

    Ok(Json(LinkResponse::from_link(&link, &state.base_url)))
}

/// Deletes a link owned by the authenticated user. Click events go with it.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
