//! Handler functions for the cart API.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::AppJson;
use crate::auth::AuthUser;
use crate::errors::AppResult;
use crate::services::cart::{self, AddToCart};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItem {
    pub product_id: Uuid,
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<AddToCart>,
) -> AppResult<impl IntoResponse> {
    let cart = cart::add_to_cart(&state.db, user.id, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "success": true, "cart": cart }))))
}

pub async fn cart_items(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let cart_items = cart::cart_lines(&state.db, user.id).await?;
    Ok(Json(json!({ "success": true, "cartItems": cart_items })))
}

pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<RemoveItem>,
) -> AppResult<impl IntoResponse> {
    let cart = cart::remove_item(&state.db, user.id, input.product_id).await?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}
