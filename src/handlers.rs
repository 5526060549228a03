pub mod fetch_data;
pub mod health;
