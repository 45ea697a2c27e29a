//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the shop's API domains
//! (catalog, cart, addresses, orders, user profiles), excluding core
//! authentication routes which are handled separately.

pub mod address;
pub mod cart;
pub mod category;
pub mod extract;
pub mod order;
pub mod product;
pub mod user;

use axum::Router;

use crate::AppState;

pub use extract::AppJson;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(category::routes::category_router())
        .merge(product::routes::product_router())
        .merge(cart::routes::cart_router())
        .merge(address::routes::address_router())
        .merge(order::routes::order_router())
        .merge(user::routes::user_router())
}
