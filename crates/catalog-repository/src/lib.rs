//! # Catalog Repository
//!
//! Product store backed by PostgreSQL through SQLx.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>
//! PgProductRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
