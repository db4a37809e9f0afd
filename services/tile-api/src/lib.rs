//! Tile API Service Library
//!
//! HTTP front end of the tile grid engine: for a configured layer, a map
//! CRS, a viewport and a display scale it returns the tiles to fetch, each
//! with its GetMap URL and screen rectangle.

pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use state::AppState;

/// Build the service router. Middleware beyond the state extension is
/// added by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/layers", get(handlers::layers_handler))
        .route("/layers/:layer/tiles", get(handlers::tiles_handler))
        // Health and metrics
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
}
