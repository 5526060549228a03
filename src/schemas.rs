use crate::config::redact_source_url;
use common::{ErrorResponse, FetchDataResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Client for the upstream open-data service
    pub client: reqwest::Client,
    /// Fixed upstream URL, including period and row range
    pub source_url: Arc<str>,
    /// `source_url` with the API key masked
    pub source_label: Arc<str>,
}

impl AppState {
    pub fn new(client: reqwest::Client, source_url: &str) -> Self {
        Self {
            client,
            source_url: Arc::from(source_url),
            source_label: Arc::from(redact_source_url(source_url)),
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Upstream URL the proxy fetches, API key masked
    pub source_url: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::fetch_data::fetch_data,
    ),
    components(
        schemas(
            FetchDataResponse,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "ridership", description = "Subway ridership proxy endpoints"),
    ),
    info(
        title = "Ridership API",
        description = "Proxy converting Seoul subway hourly ridership statistics from XML to JSON",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
