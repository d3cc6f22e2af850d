use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use townbell_core::config::TownbellConfig;
use townbell_pipeline::NotifyPipeline;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: TownbellConfig,
    pub pipeline: NotifyPipeline,
}

impl AppState {
    pub fn new(config: TownbellConfig, pipeline: NotifyPipeline) -> Self {
        Self { config, pipeline }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route(
            "/triggers/event-created",
            post(crate::http::trigger::trigger_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
