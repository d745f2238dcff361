//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// The authenticated caller, injected into request extensions by
/// [`layer`] and read by protected handlers.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: i64,
}

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The token is decoded and verified against the signing secret, and the
/// user it names must still exist. On success a [`CurrentUser`] is added to
/// the request extensions.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, the
/// signature or expiry check fails, or the user no longer exists.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user_id = st.auth_service.verify_token(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser { id: user_id });

    Ok(next.run(req).await)
}
