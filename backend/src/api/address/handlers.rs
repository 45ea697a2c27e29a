//! Handler functions for the address API.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::api::AppJson;
use crate::auth::AuthUser;
use crate::errors::AppResult;
use crate::services::addresses::{self, SaveAddress};
use crate::AppState;

pub async fn save_address(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<SaveAddress>,
) -> AppResult<impl IntoResponse> {
    let address = addresses::save_address(&state.db, user.id, input.address).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "address": address })),
    ))
}

pub async fn get_addresses(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let user_address = addresses::address_book(&state.db, user.id).await?;
    Ok(Json(json!({ "success": true, "userAddress": user_address })))
}
