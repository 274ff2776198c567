use axum::{Router, middleware, routing::get};

use crate::{AppState, handlers};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/health", get(handlers::health))
        .route(
            "/generate-sarlaft-report",
            get(handlers::generate_sarlaft_report),
        )
        .route_layer(middleware::from_fn(crate::middleware::track_http_metrics))
        .with_state(state)
}
