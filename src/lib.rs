use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod config;
pub mod domain;
pub mod drive_client;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;

use drive_client::DriveProvider;

#[derive(Clone)]
pub struct AppState {
    pub drive: Arc<dyn DriveProvider>,
}

impl AppState {
    pub fn new(drive: Arc<dyn DriveProvider>) -> Self {
        Self { drive }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/google-drive", post(http::handlers::mcp_endpoint))
        .route("/healthz", get(http::handlers::healthz))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
