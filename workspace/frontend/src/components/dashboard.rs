mod chart;
mod station_select;
mod stats;
mod view;

pub use view::Dashboard;
