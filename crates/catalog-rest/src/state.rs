//! Application state for Axum handlers.

use catalog_core::HealthCheck;
use catalog_service::ProductService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    /// Components polled by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(product_service: Arc<dyn ProductService>, health_checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        Self {
            product_service,
            health_checks,
        }
    }
}
