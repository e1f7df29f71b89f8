//! Catalog entities.

mod product;

pub use product::*;
