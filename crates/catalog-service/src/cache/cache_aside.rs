//! Cache-aside reads for product lists.

use super::{CacheExt, CacheInterface};
use catalog_core::{CatalogResult, FilterPredicate, Pagination, ProductPage, Sort};
use catalog_repository::ProductRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// TTL of a cached product list page.
pub const PRODUCT_LIST_TTL: Duration = Duration::from_secs(60);

/// Serves product list pages from the cache, falling back to the store.
///
/// A hit whose page is empty is treated as a miss. Cache failures other
/// than a miss, including a failed write-back, fail the read. Nothing is
/// invalidated on insert; stale pages live until their TTL runs out.
#[derive(Clone)]
pub struct ProductListCache {
    cache: Arc<dyn CacheInterface>,
    repository: Arc<dyn ProductRepository>,
    ttl: Duration,
}

impl ProductListCache {
    /// Creates an orchestrator with the standard TTL.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, repository: Arc<dyn ProductRepository>) -> Self {
        Self::with_ttl(cache, repository, PRODUCT_LIST_TTL)
    }

    /// Creates an orchestrator with a custom TTL.
    #[must_use]
    pub fn with_ttl(cache: Arc<dyn CacheInterface>, repository: Arc<dyn ProductRepository>, ttl: Duration) -> Self {
        Self { cache, repository, ttl }
    }

    /// Returns the cached page under `key`, or lists it from the store and caches it.
    pub async fn get_or_list(
        &self,
        key: &str,
        pagination: &Pagination,
        filter: &FilterPredicate,
        sort: &Sort,
    ) -> CatalogResult<ProductPage> {
        match self.cache.get::<ProductPage>(key).await? {
            Some(page) if !page.is_empty() => {
                debug!("Serving product list from cache: {}", key);
                return Ok(page);
            }
            Some(_) => debug!("Cached product list is empty, refreshing: {}", key),
            None => debug!("Product list not cached: {}", key),
        }

        let page = self.repository.list(pagination, filter, sort).await?;
        self.cache.set(key, &page, self.ttl).await?;

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheService;
    use async_trait::async_trait;
    use catalog_core::{CatalogError, NewProduct, Product};
    use chrono::Utc;
    use mockall::mock;

    mock! {
        pub Repo {}

        #[async_trait]
        impl ProductRepository for Repo {
            async fn insert(&self, product: &NewProduct) -> CatalogResult<Product>;
            async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Product>>;
            async fn list(&self, pagination: &Pagination, filter: &FilterPredicate, sort: &Sort) -> CatalogResult<ProductPage>;
        }
    }

    mock! {
        pub Cache {}

        #[async_trait]
        impl CacheInterface for Cache {
            async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>>;
            async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()>;
            async fn ping(&self) -> CatalogResult<()>;
            fn is_enabled(&self) -> bool;
        }
    }

    const KEY: &str = "catalog:cache:product:list:sort=product_id&dir=asc&page=1&limit=10&query=";

    fn page_with_one_product() -> ProductPage {
        ProductPage {
            products: vec![NewProduct::new("Widget", 9.5, "", 3).into_product(1, Utc::now())],
            pagination: Pagination::normalize(1, 10).with_total_rows(1),
        }
    }

    async fn list(cache: &ProductListCache) -> CatalogResult<ProductPage> {
        cache
            .get_or_list(KEY, &Pagination::normalize(1, 10), &FilterPredicate::PassThrough, &Sort::default())
            .await
    }

    #[tokio::test]
    async fn test_miss_then_hit_then_expiry() {
        let mut repo = MockRepo::new();
        repo.expect_list().times(2).returning(|_, _, _| Ok(page_with_one_product()));

        let memory = Arc::new(InMemoryCacheService::new());
        let cache = ProductListCache::with_ttl(memory.clone(), Arc::new(repo), Duration::from_millis(200));

        let first = list(&cache).await.unwrap();
        assert_eq!(first.products.len(), 1);
        assert!(memory.get_raw(KEY).await.unwrap().is_some());

        let second = list(&cache).await.unwrap();
        assert_eq!(second, first);

        tokio::time::sleep(Duration::from_millis(400)).await;
        let third = list(&cache).await.unwrap();
        assert_eq!(third.products.len(), 1);
    }

    #[tokio::test]
    async fn test_write_back_uses_list_ttl() {
        let mut backend = MockCache::new();
        backend.expect_get_raw().times(1).returning(|_| Ok(None));
        backend
            .expect_set_raw()
            .withf(|key, _, ttl| key.to_string() == KEY && *ttl == PRODUCT_LIST_TTL)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut repo = MockRepo::new();
        repo.expect_list().times(1).returning(|_, _, _| Ok(page_with_one_product()));

        let cache = ProductListCache::new(Arc::new(backend), Arc::new(repo));
        assert!(list(&cache).await.is_ok());
    }

    #[tokio::test]
    async fn test_cached_totals_survive_a_hit() {
        let mut repo = MockRepo::new();
        repo.expect_list().times(1).returning(|_, _, _| Ok(page_with_one_product()));

        let cache = ProductListCache::new(Arc::new(InMemoryCacheService::new()), Arc::new(repo));

        list(&cache).await.unwrap();
        let hit = list(&cache).await.unwrap();
        assert_eq!(hit.pagination.total_rows, 1);
        assert_eq!(hit.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_empty_cached_page_falls_through() {
        let empty = serde_json::to_string(&ProductPage::empty(Pagination::default())).unwrap();

        let mut backend = MockCache::new();
        backend.expect_get_raw().times(1).returning(move |_| Ok(Some(empty.clone())));
        backend.expect_set_raw().times(1).returning(|_, _, _| Ok(()));

        let mut repo = MockRepo::new();
        repo.expect_list().times(1).returning(|_, _, _| Ok(page_with_one_product()));

        let cache = ProductListCache::new(Arc::new(backend), Arc::new(repo));
        let page = list(&cache).await.unwrap();
        assert_eq!(page.products.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_error_does_not_fall_through() {
        let mut backend = MockCache::new();
        backend
            .expect_get_raw()
            .times(1)
            .returning(|_| Err(CatalogError::cache("connection refused")));

        let mut repo = MockRepo::new();
        repo.expect_list().never();

        let cache = ProductListCache::new(Arc::new(backend), Arc::new(repo));
        let result = list(&cache).await;
        assert!(matches!(result, Err(CatalogError::Cache(_))));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_an_error() {
        let mut backend = MockCache::new();
        backend
            .expect_get_raw()
            .times(1)
            .returning(|_| Ok(Some("not json".to_string())));

        let mut repo = MockRepo::new();
        repo.expect_list().never();

        let cache = ProductListCache::new(Arc::new(backend), Arc::new(repo));
        let result = list(&cache).await;
        assert!(matches!(result, Err(CatalogError::Internal(_))));
    }

    #[tokio::test]
    async fn test_write_back_failure_fails_the_read() {
        let mut backend = MockCache::new();
        backend.expect_get_raw().times(1).returning(|_| Ok(None));
        backend
            .expect_set_raw()
            .times(1)
            .returning(|_, _, _| Err(CatalogError::cache("read only replica")));

        let mut repo = MockRepo::new();
        repo.expect_list().times(1).returning(|_, _, _| Ok(page_with_one_product()));

        let cache = ProductListCache::new(Arc::new(backend), Arc::new(repo));
        let result = list(&cache).await;
        assert!(matches!(result, Err(CatalogError::Cache(_))));
    }

    #[tokio::test]
    async fn test_store_error_is_not_cached() {
        let mut backend = MockCache::new();
        backend.expect_get_raw().times(1).returning(|_| Ok(None));
        backend.expect_set_raw().never();

        let mut repo = MockRepo::new();
        repo.expect_list()
            .times(1)
            .returning(|_, _, _| Err(CatalogError::Database("connection reset".to_string())));

        let cache = ProductListCache::new(Arc::new(backend), Arc::new(repo));
        let result = list(&cache).await;
        assert!(matches!(result, Err(CatalogError::Database(_))));
    }
}
