//! Defines the HTTP routes for the category API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_category, delete_categories, get_categories};
use crate::AppState;

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/category/create", post(create_category))
        .route("/category/getcategory", get(get_categories))
        .route("/category/delete", post(delete_categories))
}
