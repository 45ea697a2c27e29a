//! Defines the HTTP routes for the cart API.

use axum::{routing::post, Router};

use super::handlers::{add_to_cart, cart_items, remove_item};
use crate::AppState;

pub fn cart_router() -> Router<AppState> {
    Router::new()
        .route("/user/cart/addtocart", post(add_to_cart))
        .route("/user/getCartItems", post(cart_items))
        .route("/user/cart/removeItem", post(remove_item))
}
