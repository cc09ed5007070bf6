//! Social Error Types
//!
//! Failures of the page and action routes, integrated with
//! `kernel::error::AppError`.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::client::ClientError;
use thiserror::Error;

/// Social result type alias
pub type SocialResult<T> = Result<T, SocialError>;

/// Social error variants
#[derive(Debug, Error)]
pub enum SocialError {
    /// Downstream service does not know the story or user
    #[error("Not found")]
    NotFound,

    /// Downstream service refused, e.g. deleting somebody else's story
    #[error("Forbidden")]
    Forbidden,

    /// Unexpected status, transport failure or timeout
    #[error("{service} service error: {message}")]
    Downstream {
        service: &'static str,
        message: String,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl SocialError {
    pub fn downstream(service: &'static str, message: impl Into<String>) -> Self {
        SocialError::Downstream {
            service,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SocialError::NotFound => StatusCode::NOT_FOUND,
            SocialError::Forbidden => StatusCode::FORBIDDEN,
            SocialError::Downstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SocialError::Auth(e) => e.status_code(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SocialError::NotFound => ErrorKind::NotFound,
            SocialError::Forbidden => ErrorKind::Forbidden,
            SocialError::Downstream { .. } => ErrorKind::InternalServerError,
            SocialError::Auth(e) => e.kind(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            SocialError::NotFound => AppError::not_found("Ooops.. not found!"),
            SocialError::Forbidden => {
                AppError::forbidden("You are not allowed to do that")
            }
            SocialError::Downstream { .. } => {
                AppError::internal("Something went wrong, please try again later")
            }
            SocialError::Auth(e) => e.to_app_error(),
        }
    }
}

impl IntoResponse for SocialError {
    fn into_response(self) -> Response {
        match self {
            SocialError::Auth(e) => e.into_response(),
            SocialError::Downstream { service, message } => {
                tracing::error!(service, message = %message, "Downstream service failure");
                SocialError::Downstream { service, message }
                    .to_app_error()
                    .into_response()
            }
            other => {
                tracing::debug!(error = %other, "Social request refused");
                other.to_app_error().into_response()
            }
        }
    }
}

impl From<ClientError> for SocialError {
    fn from(err: ClientError) -> Self {
        let service = match &err {
            ClientError::Timeout { service, .. }
            | ClientError::Transport { service, .. }
            | ClientError::InvalidBaseUrl { service, .. } => *service,
            ClientError::Build(_) => "client",
        };
        SocialError::downstream(service, err.to_string())
    }
}
