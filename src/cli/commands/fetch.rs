use anyhow::{anyhow, Result};
use common::{RidershipDataset, RidershipRow};
use tracing::{debug, info};

use crate::config::{build_http_client, redact_source_url};
use crate::upstream::fetch_converted;

/// Fetch once and print either the converted document or one station's table
pub async fn fetch(source_url: &str, station: Option<&str>) -> Result<()> {
    info!("Fetching ridership data from {}", redact_source_url(source_url));
    let client = build_http_client()?;
    let converted = fetch_converted(&client, source_url).await?;

    let Some(station) = station else {
        println!("{}", serde_json::to_string_pretty(&converted)?);
        return Ok(());
    };

    let dataset = RidershipDataset::from_converted(&converted)?;
    debug!("Dataset holds {} rows", dataset.rows.len());
    let row = dataset
        .find_station(station)
        .ok_or_else(|| anyhow!("No data found for the station: {}", station))?;

    print!("{}", render_table(row));
    Ok(())
}

fn render_table(row: &RidershipRow) -> String {
    let mut out = format!(
        "{} {} {}\n",
        row.station,
        row.line.as_deref().unwrap_or("-"),
        row.month.as_deref().unwrap_or("-")
    );
    out.push_str(&format!("{:>4} {:>10} {:>10}\n", "hour", "ride_on", "ride_off"));
    for hour in &row.hours {
        out.push_str(&format!("{:>4} {:>10} {:>10}\n", hour.hour, hour.ride_on, hour.ride_off));
    }
    out
}
