//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Recoverable
//! errors turn into a redirect carrying a status message; everything else
//! becomes a 500 page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use thiserror::Error;

use crate::api::flash::{Flash, FlashLevel};
use crate::config::{ROUTE_INDEX, ROUTE_LOGIN, ROUTE_SIGNUP};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Please log in to access this page.")]
    Unauthenticated,

    #[error("You are not allowed to modify this todo.")]
    Forbidden,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    // Resource errors
    #[error("Todo not found.")]
    NotFound,

    #[error("Username already exists. Choose another.")]
    DuplicateUsername,

    // Validation
    #[error("{0}")]
    InvalidInput(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Template error")]
    Template(#[from] tera::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::DuplicateUsername => "DUPLICATE_USERNAME",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Page to send the client to for errors the user can act on.
    ///
    /// Returns `None` for failures that must surface as a server error.
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials => Some(ROUTE_LOGIN),
            AppError::DuplicateUsername => Some(ROUTE_SIGNUP),
            AppError::Forbidden | AppError::NotFound | AppError::InvalidInput(_) => {
                Some(ROUTE_INDEX)
            }
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => None,
        }
    }

    /// Flash level matching the error kind
    fn flash_level(&self) -> FlashLevel {
        match self {
            AppError::Unauthenticated => FlashLevel::Info,
            _ => FlashLevel::Danger,
        }
    }

    /// Status message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                "A rendering error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.redirect_target() {
            Some(target) => {
                tracing::debug!(code = self.code(), target, "Recovered request error");
                let flash = Flash::new(self.flash_level(), self.user_message());
                let jar = flash.store(CookieJar::new());
                (jar, Redirect::to(target)).into_response()
            }
            None => {
                let message = self.user_message();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(format!(
                        "<!doctype html><title>Internal Server Error</title><h1>Internal Server Error</h1><p>{}</p>",
                        message
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
