//! Module for the shopping cart API of the signed-in user.

pub mod handlers;
pub mod routes;
