//! Custom error types specific to authentication failures.
//!
//! This module defines the errors that can occur while signing users up,
//! signing them in, or checking the bearer token on a protected route.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization required")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Admin access denied")]
    AdminOnly,

    #[error("User already registered")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::AdminOnly => StatusCode::FORBIDDEN,
            AuthError::UserExists | AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::Hashing(_) | AuthError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
