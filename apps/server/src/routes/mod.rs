pub mod health;

use axum::{routing::get, Router};

use crate::devices::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/devices/:device_id", get(handlers::handle_device_page))
        .route(
            "/devices/:device_id/config",
            get(handlers::handle_device_config),
        )
        .route(
            "/devices/:device_id/strategy",
            get(handlers::handle_device_strategy),
        )
        .with_state(state)
}
