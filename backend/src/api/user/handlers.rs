//! Handler functions for user profile API endpoints.
//!
//! These functions read the signed-in user's account and return it without
//! credentials.

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::{AuthUser, UserProfile};
use crate::errors::{AppError, AppResult};
use crate::AppState;

pub async fn profile(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let account = state
        .db
        .users
        .get(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(json!({ "success": true, "user": UserProfile::from(&account) })))
}
