//! Module for user profile API endpoints.
//!
//! This module handles functionalities related to user information that is
//! distinct from the core authentication process, such as retrieving the
//! signed-in user's profile.

pub mod handlers;
pub mod routes;
