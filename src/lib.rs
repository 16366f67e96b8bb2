//! Backoffice administrative backend
//!
//! A small Rust REST server for back-office administration: account
//! registration and login, a dashboard overview aggregating the local client
//! book with external CRM systems, and an equipment inventory with
//! power-consumption statistics.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Accounts
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/users", get(api::users::list_users))
        // Dashboard
        .route("/overview", get(api::overview::get_overview))
        // Equipment inventory
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        // Platform principal
        .route("/principal", get(api::principal::get_principal))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
