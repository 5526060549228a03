use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::{ErrorResponse, FetchDataResponse};
use tracing::{error, info, instrument};
use crate::schemas::AppState;
use crate::upstream::{fetch_converted, FetchError};

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        error!(error = %self, "Error fetching data");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::fetch_failed()),
        )
            .into_response()
    }
}

/// Fetch the ridership statistics and return them converted to JSON
#[utoipa::path(
    get,
    path = "/api/fetchData",
    tag = "ridership",
    responses(
        (status = 200, description = "Upstream XML converted to JSON", body = FetchDataResponse),
        (status = 500, description = "Upstream request or conversion failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn fetch_data(State(state): State<AppState>) -> Result<Json<FetchDataResponse>, FetchError> {
    let data = fetch_converted(&state.client, &state.source_url).await?;
    info!("Ridership data fetched and converted");
    Ok(Json(FetchDataResponse { data }))
}
