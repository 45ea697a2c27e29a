//! Module for the product API.
//!
//! This module defines the endpoints for creating, listing, looking up and
//! deleting products, including the per-category listing with price buckets.

pub mod handlers;
pub mod routes;
