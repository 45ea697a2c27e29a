//! Handler functions for the category API.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::AppJson;
use crate::auth::AdminUser;
use crate::errors::AppResult;
use crate::services::catalog::{self, NewCategory};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteCategories {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

pub async fn create_category(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(input): AppJson<NewCategory>,
) -> AppResult<impl IntoResponse> {
    let category = catalog::create_category(&state.db, input, admin.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "category": category })),
    ))
}

pub async fn get_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let category_list = catalog::category_tree(&state.db).await?;
    Ok(Json(json!({ "success": true, "categoryList": category_list })))
}

pub async fn delete_categories(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppJson(input): AppJson<DeleteCategories>,
) -> AppResult<impl IntoResponse> {
    let deleted = catalog::delete_categories(&state.db, &input.ids).await?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
