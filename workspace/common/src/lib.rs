//! Types shared between the ridership proxy and the dashboard frontend.
//! The backend serializes the transport structs below; the frontend
//! deserializes them and reuses the same decoding of the payload.

mod chart;
pub mod dashboard;
mod ridership;
mod stations;

pub use chart::{hour_labels, ChartDataset, ChartSeries, SeriesStyle};
pub use dashboard::{
    project_station, DashboardAction, DashboardState, LoadError, LoadPhase, LoadTicket,
    LoadTicketIssuer,
};
pub use ridership::{
    DatasetError, HourlyRidership, RidershipDataset, RidershipRow, UpstreamResult, HOURS_PER_DAY,
    SERVICE_NAME,
};
pub use stations::{is_known_station, DEFAULT_STATION, STATIONS};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Path of the proxy endpoint
pub const FETCH_DATA_PATH: &str = "/api/fetchData";

/// Body text returned for every proxy failure
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Successful proxy response: the converted XML document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FetchDataResponse {
    /// Upstream XML converted to JSON, keyed by the root element name
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

/// Failed proxy response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Fixed error message
    pub error: String,
}

impl ErrorResponse {
    pub fn fetch_failed() -> Self {
        Self {
            error: FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::fetch_failed()).unwrap();
        assert_eq!(body, json!({ "error": "Failed to fetch data" }));
    }

    #[test]
    fn test_fetch_data_response_shape() {
        let body: FetchDataResponse =
            serde_json::from_value(json!({ "data": { "CardSubwayTime": { "row": [] } } })).unwrap();
        assert_eq!(body.data["CardSubwayTime"]["row"], json!([]));
    }
}
