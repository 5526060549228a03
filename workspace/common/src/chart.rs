use serde::Serialize;

use crate::ridership::{RidershipRow, HOURS_PER_DAY};

/// Presentation attributes of one line series.
///
/// Styles are constants; a dataset is always a fresh merge of a style and data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesStyle {
    pub label: &'static str,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub fill: bool,
}

impl SeriesStyle {
    pub const RIDE_ON: SeriesStyle = SeriesStyle {
        label: "승차 인원",
        border_color: "rgba(75,192,192,1)",
        background_color: "rgba(75,192,192,0.2)",
        fill: false,
    };

    pub const RIDE_OFF: SeriesStyle = SeriesStyle {
        label: "하차 인원",
        border_color: "rgba(255,99,132,1)",
        background_color: "rgba(255,99,132,0.2)",
        fill: false,
    };

    pub fn with_data(self, data: Vec<u64>) -> ChartDataset {
        ChartDataset { style: self, data }
    }
}

/// A styled series of hourly values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    pub style: SeriesStyle,
    pub data: Vec<u64>,
}

impl ChartDataset {
    pub fn total(&self) -> u64 {
        self.data.iter().sum()
    }

    /// Busiest hour and its count; the earliest hour wins ties
    pub fn peak(&self) -> Option<(usize, u64)> {
        self.data
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (hour, value)| match best {
                Some((_, top)) if top >= value => best,
                _ => Some((hour, value)),
            })
    }
}

/// What the line chart draws: hour labels plus ride-on and ride-off series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub ride_on: ChartDataset,
    pub ride_off: ChartDataset,
}

impl ChartSeries {
    /// Chart shown before the first successful load
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            ride_on: SeriesStyle::RIDE_ON.with_data(Vec::new()),
            ride_off: SeriesStyle::RIDE_OFF.with_data(Vec::new()),
        }
    }

    pub fn from_row(row: &RidershipRow) -> Self {
        Self {
            labels: hour_labels(),
            ride_on: SeriesStyle::RIDE_ON.with_data(row.ride_on()),
            ride_off: SeriesStyle::RIDE_OFF.with_data(row.ride_off()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ChartSeries {
    fn default() -> Self {
        Self::empty()
    }
}

/// `0시` through `23시`
pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY).map(|hour| format!("{}시", hour)).collect()
}
