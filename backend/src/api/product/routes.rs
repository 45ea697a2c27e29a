//! Defines the HTTP routes for the product API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{all_products, create_product, delete_product, product_details, products_by_slug};
use crate::AppState;

pub fn product_router() -> Router<AppState> {
    Router::new()
        .route("/product/create", post(create_product))
        .route("/products", get(all_products))
        .route("/products/:slug", get(products_by_slug))
        .route("/product/:product_id", get(product_details).delete(delete_product))
}
