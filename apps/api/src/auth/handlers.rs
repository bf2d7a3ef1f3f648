use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::{bearer_session, validate_email, validate_password, CurrentUser};
use crate::backend::{Credentials, PasswordReset, Session, UserInfo};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, AppError> {
    validate_email(&credentials.email)?;
    validate_password(&credentials.password)?;

    let session = state.backend.login(&credentials).await?;
    info!(email = %credentials.email, "User logged in");
    Ok(Json(session))
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<StatusCode, AppError> {
    validate_email(&credentials.email)?;
    validate_password(&credentials.password)?;

    state.backend.register(&credentials).await?;
    info!(email = %credentials.email, "User registered");
    Ok(StatusCode::CREATED)
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let session = bearer_session(&headers)?;
    state.backend.logout(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// POST /api/v1/auth/reset-request
/// Asks the identity service to email a reset link.
pub async fn handle_reset_request(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<StatusCode, AppError> {
    validate_email(&req.email)?;
    state.backend.send_reset_password_email(req.email.trim()).await?;
    Ok(StatusCode::ACCEPTED)
}

/// POST /api/v1/auth/reset
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Json(reset): Json<PasswordReset>,
) -> Result<StatusCode, AppError> {
    if reset.token.trim().is_empty() {
        return Err(AppError::Validation("Reset token is required".to_string()));
    }
    validate_password(&reset.password)?;

    state.backend.reset_password(&reset).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn handle_me(CurrentUser(user): CurrentUser) -> Json<UserInfo> {
    Json(user)
}
