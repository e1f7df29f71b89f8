//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use catalog_config::RedisConfig;
use catalog_core::{with_timeout, CatalogError, CatalogResult, HealthCheck, HealthStatus};
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service.
///
/// Every command, including acquiring a connection, is bounded by the
/// command timeout.
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Arc<Pool>,
    command_timeout: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>, command_timeout: Duration) -> Self {
        Self { pool, command_timeout }
    }

    /// Build the connection pool from configuration.
    ///
    /// Connections are opened lazily, so this does not touch the network.
    pub fn from_config(config: &RedisConfig) -> CatalogResult<Self> {
        let mut pool_config = Config::from_url(config.connection_url());
        pool_config.pool = Some(PoolConfig::new(config.pool_size as usize));

        let pool = pool_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CatalogError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        info!("Redis pool created (size {})", config.pool_size);
        Ok(Self::new(Arc::new(pool), config.command_timeout()))
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| CatalogError::Cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        let value = with_timeout(self.command_timeout, || async {
            let mut conn = self.get_conn().await?;
            conn.get::<_, Option<String>>(key)
                .await
                .map_err(|e| CatalogError::Cache(format!("Failed to get key '{}': {}", key, e)))
        })
        .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        let ttl_secs = ttl.as_secs().max(1);

        with_timeout(self.command_timeout, || async {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(key, value, ttl_secs)
                .await
                .map_err(|e| CatalogError::Cache(format!("Failed to set key '{}': {}", key, e)))
        })
        .await?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn ping(&self) -> CatalogResult<()> {
        with_timeout(self.command_timeout, || async {
            let mut conn = self.get_conn().await?;
            let _: String = deadpool_redis::redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(|e| CatalogError::Cache(format!("PING failed: {}", e)))?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        match self.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
