//! Handler functions for the order API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::api::AppJson;
use crate::auth::{AdminUser, AuthUser};
use crate::errors::AppResult;
use crate::services::orders::{self, NewOrder, StatusUpdate};
use crate::utils::parse_id;
use crate::AppState;

pub async fn add_order(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<NewOrder>,
) -> AppResult<impl IntoResponse> {
    let new_order = orders::place_order(&state.db, user.id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "newOrder": new_order })),
    ))
}

pub async fn user_orders(State(state): State<AppState>, user: AuthUser) -> AppResult<impl IntoResponse> {
    let orders = orders::user_orders(&state.db, user.id).await?;
    Ok(Json(json!({ "success": true, "orders": orders })))
}

pub async fn all_orders(State(state): State<AppState>, _admin: AdminUser) -> AppResult<impl IntoResponse> {
    let orders = orders::all_orders(&state.db).await?;
    Ok(Json(json!({ "success": true, "orders": orders })))
}

pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let order_id = parse_id(&order_id, "order")?;
    let response = match orders::order_detail(&state.db, user.id, user.role, order_id).await? {
        Some(order) => (StatusCode::OK, Json(json!({ "success": true, "order": order }))),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Order not found" })),
        ),
    };
    Ok(response)
}

pub async fn update_order_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(order_id): Path<String>,
    AppJson(update): AppJson<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    let order_id = parse_id(&order_id, "order")?;
    let updated_order = orders::update_status(&state.db, order_id, update.status).await?;
    Ok(Json(json!({ "success": true, "updatedOrder": updated_order })))
}
