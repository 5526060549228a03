use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::schemas::AppState;

/// Default bind address for the web server
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Open-data gateway serving the ridership statistics
pub const SOURCE_HOST: &str = "http://openapi.seoul.go.kr:8088";

/// Month queried when none is configured
pub const DEFAULT_MONTH: &str = "202411";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid usage month '{0}', expected YYYYMM")]
    InvalidMonth(String),

    #[error("Invalid row range {start}..={end}")]
    InvalidRowRange { start: u32, end: u32 },
}

/// Calendar month the statistics are requested for (`YYYYMM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageMonth(NaiveDate);

impl FromStr for UsageMonth {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidMonth(s.to_string());
        if s.len() != 6 || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(&format!("{}01", s), "%Y%m%d")
            .map(UsageMonth)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for UsageMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.0.year(), self.0.month())
    }
}

/// Parameters encoded in the path of the upstream URL.
///
/// Callers of the proxy never supply these; they are fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceQuery {
    pub host: String,
    pub api_key: String,
    pub format: String,
    pub service: String,
    pub start_row: u32,
    pub end_row: u32,
    pub month: UsageMonth,
}

impl Default for SourceQuery {
    fn default() -> Self {
        Self {
            host: SOURCE_HOST.to_string(),
            api_key: "sample".to_string(),
            format: "xml".to_string(),
            service: common::SERVICE_NAME.to_string(),
            start_row: 1,
            end_row: 5,
            month: UsageMonth(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap_or_default()),
        }
    }
}

impl SourceQuery {
    pub fn with_month(mut self, month: UsageMonth) -> Self {
        self.month = month;
        self
    }

    pub fn with_rows(mut self, start_row: u32, end_row: u32) -> std::result::Result<Self, ConfigError> {
        if start_row == 0 || end_row < start_row {
            return Err(ConfigError::InvalidRowRange { start: start_row, end: end_row });
        }
        self.start_row = start_row;
        self.end_row = end_row;
        Ok(self)
    }

    /// Full upstream URL, e.g.
    /// `http://openapi.seoul.go.kr:8088/sample/xml/CardSubwayTime/1/5/202411/`
    pub fn url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}/{}/",
            self.host.trim_end_matches('/'),
            self.api_key,
            self.format,
            self.service,
            self.start_row,
            self.end_row,
            self.month
        )
    }
}

/// Read a `.env` file into the process environment if one exists.
///
/// Runs before tracing is initialized so `RUST_LOG` may come from the file.
pub fn load_environment() {
    dotenvy::dotenv().ok();
}

/// HTTP client used for the upstream request
pub fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Initialize application state for the given upstream URL
pub fn initialize_app_state(source_url: &str) -> Result<AppState> {
    tracing::info!("Ridership source: {}", redact_source_url(source_url));
    let client = build_http_client()?;
    Ok(AppState::new(client, source_url))
}

/// Placeholder written over the API key segment of logged or reported URLs
pub const REDACTED: &str = "REDACTED";

/// Upstream URL safe to log or report: the API key (first path segment),
/// any query string and any password are masked.
pub fn redact_source_url(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return REDACTED.to_string();
    };
    let segments: Vec<String> = parsed
        .path_segments()
        .map(|segments| segments.map(str::to_string).collect())
        .unwrap_or_default();
    if let Some((key, rest)) = segments.split_first() {
        if !key.is_empty() {
            if let Ok(mut path) = parsed.path_segments_mut() {
                path.clear().push(REDACTED).extend(rest);
            }
        }
    }
    parsed.set_query(None);
    let _ = parsed.set_password(None);
    parsed.to_string()
}
