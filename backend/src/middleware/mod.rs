//! General-purpose middleware for the API.
//!
//! This module contains the CORS and request tracing layers applied to the
//! whole Axum router.

use std::time::Duration;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::{HttpMakeClassifier, TraceLayer},
};

/// Allows any origin, as the storefront and admin dashboards are served from
/// separate hosts.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 60))
}

pub fn trace() -> TraceLayer<HttpMakeClassifier> {
    TraceLayer::new_for_http()
}
