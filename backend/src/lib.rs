//! Shopfront backend: the HTTP API of a small online shop.
//!
//! The router exposes user and admin authentication, the category and product
//! catalog, per-user carts and saved addresses, and order placement with a
//! status timeline. All data lives in a [`adapters::DocumentStore`].

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod utils;

use std::sync::Arc;

use adapters::DocumentStore;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};

use auth::AuthService;
use config::Config;
use database::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self {
            db: Database::new(store),
            auth: Arc::new(AuthService::new(&config.jwt_secret, config.jwt_ttl_hours)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(auth::auth_router())
        .merge(api::api_router());

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api", routes)
        .layer(middleware::cors())
        .layer(middleware::trace())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Welcome to Shopfront!"
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable")
        }
    }
}
