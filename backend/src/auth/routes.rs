//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user and admin signup and signin. They are designed to
//! be nested into the main Axum router under `/api`.

use axum::{routing::post, Router};

use super::handlers::{admin_signin, admin_signup, signin, signup};
use crate::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/admin/signup", post(admin_signup))
        .route("/admin/signin", post(admin_signin))
}
