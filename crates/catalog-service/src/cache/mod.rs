//! Caching infrastructure for the service layer.
//!
//! This module provides a cache abstraction with Redis and in-memory
//! implementations, plus the cache-aside orchestration used for product
//! list reads.

mod cache_aside;
mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_aside::{ProductListCache, PRODUCT_LIST_TTL};
pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::RedisCacheService;
