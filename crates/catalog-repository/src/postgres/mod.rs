//! PostgreSQL implementations.

mod product_repository;
pub mod query;

pub use product_repository::*;
