use crate::handlers::{fetch_data::fetch_data, health::health_check};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use common::FETCH_DATA_PATH;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware.
///
/// With `static_dir` set, unmatched paths are served from that directory
/// (the built dashboard), so page and API share one origin.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Ridership proxy
        .route(FETCH_DATA_PATH, get(fetch_data))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let router = match static_dir {
        Some(dir) => {
            tracing::info!("Serving dashboard from {}", dir.display());
            router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        }
        None => router,
    };

    // No timeout layer: a hung upstream holds its request open
    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
