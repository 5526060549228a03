//! XML → JSON conversion for the ridership proxy.
//!
//! The upstream open-data service only speaks XML; this crate turns a response
//! body into a `serde_json::Value` tree whose shape depends only on the document
//! (single elements stay scalar, repeated elements become arrays).

mod error;
mod xml;

pub use error::{Result, TransformError};
pub use xml::{xml_to_json, ATTRIBUTES_KEY, TEXT_KEY};
