//! Client side of the proxy: one GET to the open-data service, then XML → JSON.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, trace};
use transform::{xml_to_json, TransformError};

use crate::config::redact_source_url;

/// Everything that can go wrong between sending the request and holding JSON.
///
/// `url` fields hold the redacted upstream URL.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection or transport failure
    #[error("HTTP error calling {url}: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    /// The service answered with a non-2xx status
    #[error("{url} returned {status}")]
    Status { url: String, status: u16 },
    /// The response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        source: reqwest::Error,
    },
    /// The body is not well-formed XML
    #[error("failed to convert response: {0}")]
    Transform(#[from] TransformError),
}

/// Fetch `url` and convert the XML body into a JSON tree
#[instrument(skip(client, url), fields(url = %redact_source_url(url)))]
pub async fn fetch_converted(client: &reqwest::Client, url: &str) -> Result<Value, FetchError> {
    trace!("Sending upstream request");
    let response = client.get(url).send().await.map_err(|source| FetchError::Request {
        url: redact_source_url(url),
        source: source.without_url(),
    })?;

    let status = response.status();
    debug!(status = status.as_u16(), "Upstream responded");
    if !status.is_success() {
        return Err(FetchError::Status {
            url: redact_source_url(url),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Body {
        url: redact_source_url(url),
        source: source.without_url(),
    })?;
    trace!(bytes = body.len(), "Upstream body received");

    Ok(xml_to_json(&body)?)
}
