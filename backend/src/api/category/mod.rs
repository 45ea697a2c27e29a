//! Module for the category API.
//!
//! Admins create and delete categories; anyone can read the category tree.

pub mod handlers;
pub mod routes;
