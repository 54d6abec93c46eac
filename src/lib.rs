//! Office Locations
//!
//! CRUD backend for office location records, an in-process fake server,
//! a typed API client and a headless list view that polls it.

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;
pub mod transport;
pub mod view;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use store::RecordStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let office_routes = Router::new()
        .route("/offices", get(api::list_offices))
        .route("/office", post(api::create_office))
        .route(
            "/office/{id}",
            put(api::update_office).delete(api::delete_office),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(office_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
