//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse signup and signin payloads and delegate to
//! `auth::service` for the account logic.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use super::models::{SigninRequest, SignupRequest};
use crate::api::AppJson;
use crate::database::models::Role;
use crate::errors::AppResult;
use crate::AppState;

async fn register(state: AppState, request: SignupRequest, role: Role) -> AppResult<impl IntoResponse> {
    state.auth.signup(&state.db, request, role).await?;
    let message = match role {
        Role::Admin => "Admin created successfully",
        Role::User => "User created successfully",
    };
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": message })),
    ))
}

pub async fn signup(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    register(state, request, Role::User).await
}

pub async fn admin_signup(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    register(state, request, Role::Admin).await
}

pub async fn signin(
    State(state): State<AppState>,
    AppJson(request): AppJson<SigninRequest>,
) -> AppResult<impl IntoResponse> {
    let response = state.auth.signin(&state.db, request, None).await?;
    Ok(Json(response))
}

pub async fn admin_signin(
    State(state): State<AppState>,
    AppJson(request): AppJson<SigninRequest>,
) -> AppResult<impl IntoResponse> {
    let response = state.auth.signin(&state.db, request, Some(Role::Admin)).await?;
    Ok(Json(response))
}
