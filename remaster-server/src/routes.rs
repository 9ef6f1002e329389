use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers::{
        batch_handlers::{
            next_item_handler, pass_status_handler, start_pass_handler, stop_pass_handler,
        },
        bridge_handlers::client_bridge_handler,
    },
    state::AppState,
};

/// Create all v1 API routes
pub fn create_v1_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/batch/start", post(start_pass_handler))
        .route("/api/v1/batch/next", post(next_item_handler))
        .route("/api/v1/batch/stop", post(stop_pass_handler))
        .route("/api/v1/batch/status", get(pass_status_handler))
        .route("/api/v1/batch/bridge", get(client_bridge_handler))
        .with_state(state)
}
