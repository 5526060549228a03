/// Stations offered by the selector, in display order
pub const STATIONS: [&str; 5] = ["서울역", "시청", "종각", "종로3가", "종로5가"];

/// Station selected when the dashboard opens
pub const DEFAULT_STATION: &str = STATIONS[0];

pub fn is_known_station(station: &str) -> bool {
    STATIONS.contains(&station)
}
