//! Defines the HTTP routes for the order API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{add_order, all_orders, get_order, update_order_status, user_orders};
use crate::AppState;

pub fn order_router() -> Router<AppState> {
    Router::new()
        .route("/addOrder", post(add_order))
        .route("/getOrders", get(user_orders))
        .route("/order/:order_id", get(get_order))
        .route("/admin/orders", get(all_orders))
        .route("/admin/order/:order_id/status", post(update_order_status))
}
