//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::client::ClientError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Header set on every Unauthorized response
pub const AUTH_REQUIRED_HEADER: &str = "X-Auth-Required";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend refused the email/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Backend already has an account for this email
    #[error("Email already registered")]
    EmailTaken,

    /// No session under this id
    #[error("Session not found")]
    SessionNotFound,

    /// Guard rejection; `not_logged_in` tells "please log in" apart from
    /// "insufficient privilege"
    #[error("Unauthorized")]
    Unauthorized { not_logged_in: bool },

    /// Unexpected backend status, transport failure or timeout
    #[error("Auth backend error: {0}")]
    Backend(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::SessionNotFound => StatusCode::NOT_FOUND,
            AuthError::Backend(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::Unauthorized { .. } => {
                ErrorKind::Unauthorized
            }
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::SessionNotFound => ErrorKind::NotFound,
            AuthError::Backend(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Backend details stay in the logs; the client only sees a generic
    /// message for 5xx errors.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Unauthorized { not_logged_in: true } => {
                AppError::unauthorized("Please log in to continue").with_action("/login")
            }
            AuthError::Unauthorized {
                not_logged_in: false,
            } => AppError::unauthorized("You are not allowed to access this page"),
            AuthError::Backend(_) | AuthError::Internal(_) => {
                AppError::internal("Something went wrong, please try again later")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Backend(msg) => {
                tracing::error!(message = %msg, "Auth backend failure");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Unauthorized { not_logged_in } => {
                tracing::debug!(not_logged_in, "Access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();

        if let AuthError::Unauthorized { not_logged_in } = self {
            let app_error = self.to_app_error();
            let body = serde_json::json!({
                "title": app_error.kind().as_str(),
                "status": app_error.status_code(),
                "detail": app_error.message(),
                "action": app_error.action(),
                "notLogged": not_logged_in,
            });
            return (
                StatusCode::UNAUTHORIZED,
                [(AUTH_REQUIRED_HEADER, "true")],
                Json(body),
            )
                .into_response();
        }

        self.to_app_error().into_response()
    }
}

impl From<ClientError> for AuthError {
    fn from(err: ClientError) -> Self {
        AuthError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::SessionNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::Backend("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_variants_share_status() {
        let anonymous = AuthError::Unauthorized { not_logged_in: true }.into_response();
        let non_admin = AuthError::Unauthorized {
            not_logged_in: false,
        }
        .into_response();

        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(anonymous.status(), non_admin.status());
        assert_eq!(
            anonymous.headers().get(AUTH_REQUIRED_HEADER).unwrap(),
            "true"
        );
    }

    #[test]
    fn test_backend_detail_is_not_leaked() {
        let app_error = AuthError::Backend("10.0.0.3:5000 refused".into()).to_app_error();
        assert!(!app_error.message().contains("10.0.0.3"));
        assert!(app_error.is_server_error());
    }
}
