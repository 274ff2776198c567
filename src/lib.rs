pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod layout;
pub mod middleware;
pub mod models;
pub mod render;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

pub use config::Config;
pub use routes::create_router;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
