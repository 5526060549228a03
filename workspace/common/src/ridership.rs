//! Typed view of the `CardSubwayTime` open-data payload.
//!
//! The upstream row stores 48 counters as flat fields named
//! `HR_{hour}_GET_ON_NOPE` / `HR_{hour}_GET_OFF_NOPE`. They are decoded once,
//! here, into 24 [`HourlyRidership`] records so nothing else touches the
//! field-name convention.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace};
use utoipa::ToSchema;

/// Name of the open-data service and of the root element of its payload
pub const SERVICE_NAME: &str = "CardSubwayTime";

/// Number of hourly buckets in a row
pub const HOURS_PER_DAY: usize = 24;

const STATION_FIELD: &str = "STTN";
const MONTH_FIELD: &str = "USE_MM";
const LINE_FIELD: &str = "SBWY_ROUT_LN_NM";
const JOB_DATE_FIELD: &str = "JOB_YMD";
const ROW_FIELD: &str = "row";
const TOTAL_COUNT_FIELD: &str = "list_total_count";
const RESULT_FIELD: &str = "RESULT";

/// Errors raised while walking a converted payload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// The payload has no `CardSubwayTime` element
    #[error("Payload has no CardSubwayTime element")]
    MissingService,

    /// The `row` node is neither an object nor an array
    #[error("Unexpected row node: {0}")]
    InvalidRows(String),
}

/// Boarding and alighting counts for one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HourlyRidership {
    /// Hour of the day (0-23)
    pub hour: u8,
    /// Passengers getting on
    pub ride_on: u64,
    /// Passengers getting off
    pub ride_off: u64,
}

/// One station's statistics for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RidershipRow {
    /// Station name, the lookup key within a dataset
    pub station: String,
    /// Usage month (`YYYYMM`)
    pub month: Option<String>,
    /// Subway line name
    pub line: Option<String>,
    /// Date the upstream job produced this row
    pub job_date: Option<String>,
    /// Counts for hours 0 through 23, in order
    pub hours: Vec<HourlyRidership>,
}

impl RidershipRow {
    /// Decode a converted `row` element.
    ///
    /// Missing, empty or non-numeric counters decode to zero.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let hours = (0..HOURS_PER_DAY)
            .map(|hour| HourlyRidership {
                hour: hour as u8,
                ride_on: counter(fields.get(&format!("HR_{}_GET_ON_NOPE", hour))),
                ride_off: counter(fields.get(&format!("HR_{}_GET_OFF_NOPE", hour))),
            })
            .collect();

        Self {
            station: text(fields.get(STATION_FIELD)).unwrap_or_default(),
            month: text(fields.get(MONTH_FIELD)),
            line: text(fields.get(LINE_FIELD)),
            job_date: text(fields.get(JOB_DATE_FIELD)),
            hours,
        }
    }

    /// Ride-on counts in hour order
    pub fn ride_on(&self) -> Vec<u64> {
        self.hours.iter().map(|h| h.ride_on).collect()
    }

    /// Ride-off counts in hour order
    pub fn ride_off(&self) -> Vec<u64> {
        self.hours.iter().map(|h| h.ride_off).collect()
    }
}

/// Status block the service attaches to every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpstreamResult {
    pub code: String,
    pub message: String,
}

/// All rows returned by one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RidershipDataset {
    /// Total number of rows the service holds for the period
    pub total_count: Option<u64>,
    /// Result code and message reported by the service
    pub result: Option<UpstreamResult>,
    /// Rows in document order
    pub rows: Vec<RidershipRow>,
}

impl RidershipDataset {
    /// Walk a converted payload (`{ "CardSubwayTime": { "row": ... } }`).
    ///
    /// A single `row` element arrives as an object and several arrive as an
    /// array; both are accepted. Every row element yields one row.
    pub fn from_converted(payload: &Value) -> Result<Self, DatasetError> {
        let service = payload
            .get(SERVICE_NAME)
            .and_then(Value::as_object)
            .ok_or(DatasetError::MissingService)?;

        let rows = match service.get(ROW_FIELD) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(row_from_node).collect(),
            Some(node @ (Value::Object(_) | Value::String(_))) => vec![row_from_node(node)],
            Some(other) => return Err(DatasetError::InvalidRows(other.to_string())),
        };

        let result = service
            .get(RESULT_FIELD)
            .and_then(Value::as_object)
            .map(|result| UpstreamResult {
                code: text(result.get("CODE")).unwrap_or_default(),
                message: text(result.get("MESSAGE")).unwrap_or_default(),
            });

        let dataset = Self {
            total_count: text(service.get(TOTAL_COUNT_FIELD)).and_then(|t| t.trim().parse().ok()),
            result,
            rows,
        };
        debug!(rows = dataset.rows.len(), "Ridership dataset decoded");
        Ok(dataset)
    }

    /// First row whose station name equals `station` exactly
    pub fn find_station(&self, station: &str) -> Option<&RidershipRow> {
        trace!(station, "Looking up station");
        self.rows.iter().find(|row| row.station == station)
    }
}

fn row_from_node(node: &Value) -> RidershipRow {
    match node.as_object() {
        Some(fields) => RidershipRow::from_fields(fields),
        // Empty <row/> converts to a string; keep it as an all-zero row
        None => RidershipRow::from_fields(&Map::new()),
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn counter(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => parse_counter(s),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        _ => 0,
    }
}

fn parse_counter(raw: &str) -> u64 {
    let raw = raw.trim();
    raw.parse::<u64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_row(station: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("STTN".to_string(), json!(station));
        fields.insert("USE_MM".to_string(), json!("202411"));
        for hour in 0..24 {
            fields.insert(format!("HR_{}_GET_ON_NOPE", hour), json!((hour * 10).to_string()));
            fields.insert(format!("HR_{}_GET_OFF_NOPE", hour), json!((hour * 10 + 1).to_string()));
        }
        fields
    }

    #[test]
    fn test_full_row_decodes_in_hour_order() {
        let row = RidershipRow::from_fields(&full_row("시청"));

        assert_eq!(row.station, "시청");
        assert_eq!(row.month.as_deref(), Some("202411"));
        assert_eq!(row.hours.len(), 24);
        let expected_on: Vec<u64> = (0..24).map(|h| h * 10).collect();
        let expected_off: Vec<u64> = (0..24).map(|h| h * 10 + 1).collect();
        assert_eq!(row.ride_on(), expected_on);
        assert_eq!(row.ride_off(), expected_off);
        assert!(row.hours.iter().enumerate().all(|(i, h)| h.hour as usize == i));
    }

    #[test]
    fn test_missing_field_defaults_to_zero() {
        let mut fields = full_row("시청");
        fields.remove("HR_5_GET_ON_NOPE");

        let row = RidershipRow::from_fields(&fields);
        let ride_on = row.ride_on();

        assert_eq!(ride_on[5], 0);
        for (hour, value) in ride_on.iter().enumerate().filter(|(h, _)| *h != 5) {
            assert_eq!(*value, hour as u64 * 10);
        }
        assert_eq!(row.ride_off()[5], 51);
    }

    #[test]
    fn test_unparseable_counters_default_to_zero() {
        let fields = json!({
            "STTN": "종각",
            "HR_0_GET_ON_NOPE": "",
            "HR_1_GET_ON_NOPE": "abc",
            "HR_2_GET_ON_NOPE": "-4",
            "HR_3_GET_ON_NOPE": " 17 ",
            "HR_4_GET_ON_NOPE": 9,
            "HR_5_GET_ON_NOPE": "12.0",
            "HR_6_GET_ON_NOPE": { "nested": true }
        });
        let row = RidershipRow::from_fields(fields.as_object().unwrap());

        assert_eq!(&row.ride_on()[..7], &[0, 0, 0, 17, 9, 12, 0]);
    }

    #[test]
    fn test_dataset_accepts_single_row_object() {
        let payload = json!({ "CardSubwayTime": { "row": { "STTN": "서울역" } } });
        let dataset = RidershipDataset::from_converted(&payload).unwrap();

        assert_eq!(dataset.rows.len(), 1);
        assert!(dataset.find_station("서울역").is_some());
    }

    #[test]
    fn test_dataset_reads_status_block() {
        let payload = json!({
            "CardSubwayTime": {
                "list_total_count": "612",
                "RESULT": { "CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다" },
                "row": [{ "STTN": "서울역" }, { "STTN": "시청" }, ""]
            }
        });
        let dataset = RidershipDataset::from_converted(&payload).unwrap();

        assert_eq!(dataset.total_count, Some(612));
        assert_eq!(dataset.result.as_ref().map(|r| r.code.as_str()), Some("INFO-000"));
        assert_eq!(dataset.rows.len(), 3);
        assert_eq!(dataset.rows[2].station, "");
    }

    #[test]
    fn test_find_station_is_exact_and_first_match() {
        let payload = json!({
            "CardSubwayTime": {
                "row": [
                    { "STTN": "종로3가", "HR_0_GET_ON_NOPE": "1" },
                    { "STTN": "종로3가", "HR_0_GET_ON_NOPE": "2" }
                ]
            }
        });
        let dataset = RidershipDataset::from_converted(&payload).unwrap();

        assert_eq!(dataset.find_station("종로3가").unwrap().hours[0].ride_on, 1);
        assert!(dataset.find_station("종로").is_none());
        assert!(dataset.find_station("종로3가 ").is_none());
    }

    #[test]
    fn test_dataset_errors() {
        assert_eq!(
            RidershipDataset::from_converted(&json!({ "RESULT": { "CODE": "INFO-200" } })),
            Err(DatasetError::MissingService)
        );
        assert!(matches!(
            RidershipDataset::from_converted(&json!({ "CardSubwayTime": { "row": 5 } })),
            Err(DatasetError::InvalidRows(_))
        ));
    }

    #[test]
    fn test_payload_without_rows_is_an_empty_dataset() {
        let payload = json!({
            "CardSubwayTime": {
                "list_total_count": "0",
                "RESULT": { "CODE": "INFO-000", "MESSAGE": "정상 처리되었습니다" }
            }
        });
        let dataset = RidershipDataset::from_converted(&payload).unwrap();
        assert!(dataset.rows.is_empty());
        assert_eq!(dataset.total_count, Some(0));
        assert!(dataset.find_station("서울역").is_none());

        let single_empty = json!({ "CardSubwayTime": { "row": "" } });
        let dataset = RidershipDataset::from_converted(&single_empty).unwrap();
        assert_eq!(dataset.rows.len(), 1);
        assert_eq!(dataset.rows[0].ride_on(), vec![0; HOURS_PER_DAY]);
    }
}
