//! Component wiring.
//!
//! Every component is built once at startup and shared as an `Arc<dyn Trait>`:
//!
//! ```text
//! ProductServiceImpl
//!   ├─ PgProductRepository ── DatabasePool
//!   └─ CacheInterface ─────── RedisCacheService | InMemoryCacheService
//! ```

use catalog_config::{AppConfig, RedisConfig};
use catalog_core::{CatalogResult, HealthCheck};
use catalog_repository::{DatabasePool, DatabasePoolInterface, PgProductRepository, ProductRepository};
use catalog_rest::AppState;
use catalog_service::{CacheInterface, InMemoryCacheService, ProductService, ProductServiceImpl, RedisCacheService};
use std::sync::Arc;
use tracing::{info, warn};

/// Cache backend together with its health check.
#[derive(Clone)]
pub struct CacheComponents {
    pub cache: Arc<dyn CacheInterface>,
    pub health: Arc<dyn HealthCheck>,
}

/// Fully wired application components.
#[derive(Clone)]
pub struct AppComponents {
    pub db_pool: Arc<dyn DatabasePoolInterface>,
    pub repository: Arc<dyn ProductRepository>,
    pub cache: Arc<dyn CacheInterface>,
    pub product_service: Arc<dyn ProductService>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppComponents {
    /// Wires the components on top of an open pool and a cache backend.
    pub fn assemble(pool: Arc<DatabasePool>, cache: CacheComponents, config: &AppConfig) -> Self {
        let db_pool: Arc<dyn DatabasePoolInterface> = pool.clone();
        let db_health: Arc<dyn HealthCheck> = pool;
        let repository: Arc<dyn ProductRepository> =
            Arc::new(PgProductRepository::new(db_pool.clone(), config.database.query_timeout()));
        let product_service: Arc<dyn ProductService> = Arc::new(ProductServiceImpl::new(
            repository.clone(),
            cache.cache.clone(),
            config.catalog.clone(),
        ));

        Self {
            db_pool,
            repository,
            cache: cache.cache,
            product_service,
            health_checks: vec![db_health, cache.health],
        }
    }

    /// Returns the state handed to the REST router.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        AppState::new(self.product_service.clone(), self.health_checks.clone())
    }
}

/// Connects to the database, applies migrations and wires every component.
pub async fn build_components(config: &AppConfig) -> CatalogResult<AppComponents> {
    let pool = Arc::new(DatabasePool::new(&config.database).await?);

    if config.database.run_migrations {
        pool.run_migrations().await?;
    }

    let cache = build_cache(&config.redis)?;
    if let Err(e) = cache.cache.ping().await {
        warn!("Cache is not reachable yet, list requests will fail until it is: {}", e);
    }

    Ok(AppComponents::assemble(pool, cache, config))
}

/// Selects the cache backend.
///
/// Redis connections are opened lazily; with Redis disabled an in-process
/// cache takes its place.
pub fn build_cache(config: &RedisConfig) -> CatalogResult<CacheComponents> {
    if config.enabled {
        let redis = Arc::new(RedisCacheService::from_config(config)?);
        info!("Using Redis cache at {}", config.url);
        Ok(CacheComponents {
            cache: redis.clone(),
            health: redis,
        })
    } else {
        let memory = Arc::new(InMemoryCacheService::new());
        info!("Redis disabled, using in-memory cache");
        Ok(CacheComponents {
            cache: memory.clone(),
            health: memory,
        })
    }
}
