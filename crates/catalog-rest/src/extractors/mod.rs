//! Custom Axum extractors.

mod json;
mod list_query;

pub use json::*;
pub use list_query::*;
