//! Handlers for registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account and signs the new user in.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 400 if validation fails or the username/email is already taken.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let auth = state
        .auth_service
        .register(payload.username, payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: auth.user.id,
            username: auth.user.username,
            email: auth.user.email,
            token: auth.token,
        }),
    ))
}

/// Verifies credentials and issues a fresh bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 on bad credentials, without saying which part was wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let auth = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse {
        id: auth.user.id,
        email: auth.user.email,
        token: auth.token,
    }))
}
