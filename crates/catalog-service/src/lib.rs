//! # Catalog Service
//!
//! Business logic service layer for the product catalog: product
//! validation, list request resolution and cache-aside reads.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod product_service;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::ProductServiceImpl;
