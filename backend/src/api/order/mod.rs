//! Module for the order API.
//!
//! Signed-in users place and read their own orders; admins list every order
//! and advance order status.

pub mod handlers;
pub mod routes;
