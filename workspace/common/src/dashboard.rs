//! Dashboard view state and its transitions.
//!
//! The view is `Idle` until a load starts, `Loading` while the latest load is
//! in flight, and back to `Idle` once that load succeeds or fails. Each load is
//! tagged with a [`LoadTicket`]; outcomes of loads that were superseded by a
//! newer one are dropped so a slow response can never overwrite a fresher chart.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::chart::ChartSeries;
use crate::ridership::{DatasetError, RidershipDataset};
use crate::stations::DEFAULT_STATION;

/// Sequence number of one load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Hands out strictly increasing tickets
#[derive(Debug, Default)]
pub struct LoadTicketIssuer {
    next: u64,
}

impl LoadTicketIssuer {
    pub fn issue(&mut self) -> LoadTicket {
        self.next += 1;
        LoadTicket(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
}

/// Why a load left the chart untouched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Unexpected payload: {0}")]
    Dataset(#[from] DatasetError),

    #[error("No data found for the station: {0}")]
    StationNotFound(String),
}

/// Turn the converted payload returned by the proxy into the chart for `station`
pub fn project_station(payload: &Value, station: &str) -> Result<ChartSeries, LoadError> {
    let dataset = RidershipDataset::from_converted(payload)?;
    let row = dataset
        .find_station(station)
        .ok_or_else(|| LoadError::StationNotFound(station.to_string()))?;
    Ok(ChartSeries::from_row(row))
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    /// The user picked another station
    Select(String),
    /// A load was issued
    Started(LoadTicket),
    /// A load produced a chart
    Loaded { ticket: LoadTicket, series: ChartSeries },
    /// A load failed or found no row; the chart stays as it is
    Failed { ticket: LoadTicket },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub selected_station: String,
    pub series: ChartSeries,
    pub phase: LoadPhase,
    pub latest_ticket: Option<LoadTicket>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            selected_station: DEFAULT_STATION.to_string(),
            series: ChartSeries::empty(),
            phase: LoadPhase::Idle,
            latest_ticket: None,
        }
    }
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    fn is_latest(&self, ticket: LoadTicket) -> bool {
        self.latest_ticket == Some(ticket)
    }

    pub fn reduce(&self, action: DashboardAction) -> Self {
        let mut next = self.clone();
        match action {
            DashboardAction::Select(station) => {
                debug!(%station, "Station selected");
                next.selected_station = station;
            }
            DashboardAction::Started(ticket) => {
                next.latest_ticket = Some(ticket);
                next.phase = LoadPhase::Loading;
            }
            DashboardAction::Loaded { ticket, series } => {
                if self.is_latest(ticket) {
                    next.series = series;
                    next.phase = LoadPhase::Idle;
                } else {
                    warn!(ticket = ticket.value(), "Discarding outcome of superseded load");
                }
            }
            DashboardAction::Failed { ticket } => {
                if self.is_latest(ticket) {
                    next.phase = LoadPhase::Idle;
                }
            }
        }
        next
    }
}
