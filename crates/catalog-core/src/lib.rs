//! # Catalog Core
//!
//! Core types, traits, and error definitions for the product catalog.
//! Every other crate in the workspace builds on the abstractions here:
//! the error taxonomy, the `Product` entity, pagination and the query model
//! used to compose list requests.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod query;
pub mod result;
pub mod timeout;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use pagination::*;
pub use query::*;
pub use result::*;
pub use timeout::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
