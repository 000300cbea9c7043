// src/server/mod.rs
// =============================================================================
// The HTTP endpoint around the crawl engine.
//
// Routes:
//   POST /main?url=<base>   crawl (or serve from cache) and return the images
//   GET  /health            liveness probe
//
// One Crawler is shared by every request, so all requests share the result
// cache and the cap on concurrent fetches.
// =============================================================================

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::crawl::Crawler;
use crate::model::Image;

pub use handlers::ApiError;

pub struct AppState {
    pub crawler: Crawler<Image>,
}

impl AppState {
    pub fn new(crawler: Crawler<Image>) -> Self {
        Self { crawler }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/main", post(handlers::find_images))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serves `state` on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    // If the handler cannot be installed we simply never shut down gracefully
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
