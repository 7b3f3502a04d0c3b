//! Error types for the web application.

use crate::api::views;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::error;

#[cfg(test)]
mod tests;

/// Message shown on the error page for denied requests.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden access!";

/// Message shown on the error page when the server fails.
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred.";

/// Path the browser is sent to when a login is required.
pub const LOGIN_PATH: &str = "/login";

/// Convenience alias used by repositories, services and handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No authenticated principal on a protected path.
    #[error("Authentication required")]
    Unauthenticated,

    /// The principal lacks the authority required by the path.
    #[error("Access denied for {0}")]
    Forbidden(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Password hashing or other internal failure.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status used when this error is rendered as a page.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unauthenticated => Redirect::to(LOGIN_PATH).into_response(),
            AppError::Forbidden(_) => {
                (self.status(), views::error_page(FORBIDDEN_MESSAGE)).into_response()
            }
            AppError::Database(_) | AppError::Internal(_) => {
                error!("{}", self);
                (self.status(), views::error_page(INTERNAL_MESSAGE)).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::Internal(format!("password hashing failed: {}", err))
    }
}
