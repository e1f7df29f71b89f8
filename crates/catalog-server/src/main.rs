//! # Catalog Server
//!
//! Main entry point for the product catalog service.

use catalog_config::ConfigLoader;
use catalog_core::{CatalogError, CatalogResult};
use catalog_rest::create_router;
use catalog_server::{
    di::build_components,
    startup::{init_logging, print_startup_info, shutdown_signal},
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> CatalogResult<()> {
    let config = ConfigLoader::load_default()?;

    init_logging(&config.observability);

    info!("Starting product catalog server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let components = build_components(&config).await?;
    let router = create_router(components.app_state(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CatalogError::Internal(format!("REST server error: {}", e)))?;

    components.db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}
