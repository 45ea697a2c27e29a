//! Module for the saved address API of the signed-in user.

pub mod handlers;
pub mod routes;
