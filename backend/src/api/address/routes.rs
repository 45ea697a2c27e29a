//! Defines the HTTP routes for the address API.

use axum::{routing::post, Router};

use super::handlers::{get_addresses, save_address};
use crate::AppState;

pub fn address_router() -> Router<AppState> {
    Router::new()
        .route("/user/address/create", post(save_address))
        .route("/user/getaddress", post(get_addresses))
}
