//! Timeout wrapper for async operations.

use crate::CatalogError;
use std::future::Future;
use std::time::Duration;

/// Wraps an async operation with a timeout.
///
/// An elapsed deadline surfaces as [`CatalogError::Timeout`]; the inner
/// future is dropped.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, CatalogError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| CatalogError::Timeout(format!("Operation timed out after {:?}", duration)))?
}
