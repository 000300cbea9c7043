// src/server/handlers.rs
// =============================================================================
// Request handlers and the mapping from crawl errors to HTTP responses.
// =============================================================================

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::AppState;
use crate::crawl::CrawlResults;
use crate::error::CrawlError;
use crate::model::Image;

#[derive(Debug, Deserialize)]
pub struct CrawlParams {
    pub url: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    MissingUrl,
    Crawl(CrawlError),
}

impl From<CrawlError> for ApiError {
    fn from(e: CrawlError) -> Self {
        ApiError::Crawl(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingUrl => (
                StatusCode::BAD_REQUEST,
                "URL parameter is missing.".to_string(),
            ),
            ApiError::Crawl(e) => {
                let status = match &e {
                    CrawlError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
                    CrawlError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// POST /main?url=...
pub async fn find_images(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CrawlParams>,
) -> Result<Json<CrawlResults<Image>>, ApiError> {
    let url = match params.url {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Err(ApiError::MissingUrl),
    };

    info!(%url, "Received crawl request");
    let results = state.crawler.crawl(&url).await.map_err(|e| {
        error!(%url, error = %e, "Crawl request failed");
        ApiError::from(e)
    })?;

    info!(%url, images = results.len(), "Completed crawl request");
    Ok(Json(results))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
