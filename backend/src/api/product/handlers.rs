//! Handler functions for the product API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::api::AppJson;
use crate::auth::AdminUser;
use crate::errors::{AppError, AppResult};
use crate::services::catalog::{self, NewProduct};
use crate::utils::parse_id;
use crate::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(input): AppJson<NewProduct>,
) -> AppResult<impl IntoResponse> {
    let product = catalog::create_product(&state.db, input, admin.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "product": product })),
    ))
}

pub async fn products_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let listing = catalog::products_by_category_slug(&state.db, &slug).await?;
    let mut body = serde_json::to_value(listing)?;
    body["success"] = json!(true);
    Ok(Json(body))
}

pub async fn product_details(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&product_id, "product")?;
    let product = state
        .db
        .products
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Json(json!({ "success": true, "product": product })))
}

pub async fn all_products(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<impl IntoResponse> {
    let products = state.db.products.all().await?;
    Ok(Json(json!({ "success": true, "products": products })))
}

pub async fn delete_product(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(product_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&product_id, "product")?;
    if !state.db.products.delete_by_id(id).await? {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(Json(json!({ "success": true, "deleted": id })))
}
