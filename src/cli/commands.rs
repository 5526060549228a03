pub mod fetch;
pub mod serve;

pub use fetch::fetch;
pub use serve::serve;
