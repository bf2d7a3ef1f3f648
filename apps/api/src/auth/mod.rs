//! Account flows delegated to the backend identity service.
//! This service keeps no session state of its own; the client holds the token.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use crate::backend::{BackendError, Session, UserInfo};
use crate::errors::AppError;
use crate::state::AppState;

pub mod handlers;

/// The signed-in caller, resolved from the bearer token through the identity
/// service. Every user-scoped handler takes this instead of a client-sent id.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserInfo);

impl CurrentUser {
    /// Owner key stored in the `user_id` column of user-scoped tables.
    pub fn user_id(&self) -> String {
        self.0.id.to_string()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let session = bearer_session(&parts.headers)?;
        match state.backend.current_user(&session).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(BackendError::Remote(reason)) => {
                warn!("Session rejected by identity service: {reason}");
                Err(AppError::Unauthorized)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Reads the session token from an `Authorization: Bearer <token>` header.
pub fn bearer_session(headers: &HeaderMap) -> Result<Session, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    Ok(Session {
        token: token.to_string(),
    })
}

/// Minimal shape check before handing an email to the identity service.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ))
    }
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_session_reads_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_session(&headers).unwrap().token, "abc123");
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        assert!(matches!(
            bearer_session(&HeaderMap::new()),
            Err(AppError::Unauthorized)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(bearer_session(&headers), Err(AppError::Unauthorized)));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert!(matches!(bearer_session(&headers), Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_current_user_resolves_session() {
        use crate::backend::memory::MemoryBackend;
        use crate::state::test_support::test_state;
        use std::sync::Arc;

        let state = test_state(Arc::new(MemoryBackend::new()));
        let request = axum::http::Request::builder()
            .header(AUTHORIZATION, "Bearer session-grace@navy.mil")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let user = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(user.user_id(), "1");
        assert_eq!(user.0.email, "grace@navy.mil");

        let request = axum::http::Request::builder()
            .header(AUTHORIZATION, "Bearer forged")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("grace@navy.mil").is_ok());
        assert!(validate_email("grace").is_err());
        assert!(validate_email("@navy.mil").is_err());
        assert!(validate_email("grace@localhost").is_err());
    }
}
