//! Product service implementation.

use crate::cache::{cache_keys, CacheInterface, ProductListCache};
use crate::dto::{CreateProductRequest, ListProductsRequest, ProductListResponse};
use crate::product_service::ProductService;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use catalog_config::CatalogConfig;
use catalog_core::{
    rules, CatalogError, CatalogResult, FilterPredicate, NewProduct, Pagination, Product, Sort, DUPLICATE_NAME_MESSAGE,
};
use catalog_repository::ProductRepository;
use std::sync::Arc;
use tracing::{debug, info, warn};

const NAME_FIELD: &str = "product name";
const DESCRIPTION_FIELD: &str = "description";

/// Product service.
pub struct ProductServiceImpl {
    repository: Arc<dyn ProductRepository>,
    list_cache: ProductListCache,
    limits: CatalogConfig,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    #[must_use]
    pub fn new(repository: Arc<dyn ProductRepository>, cache: Arc<dyn CacheInterface>, limits: CatalogConfig) -> Self {
        let list_cache = ProductListCache::new(cache, repository.clone());
        Self::with_list_cache(repository, list_cache, limits)
    }

    /// Creates a product service around an existing list cache.
    #[must_use]
    pub fn with_list_cache(
        repository: Arc<dyn ProductRepository>,
        list_cache: ProductListCache,
        limits: CatalogConfig,
    ) -> Self {
        Self {
            repository,
            list_cache,
            limits,
        }
    }

    /// Checks a create request field by field; the first failure wins.
    async fn validate(&self, request: &CreateProductRequest) -> CatalogResult<()> {
        rules::not_blank(&request.name, NAME_FIELD)?;
        rules::max_length(&request.name, self.limits.product_name_max_length, NAME_FIELD)?;
        rules::product_name_charset(&request.name)?;

        if self.repository.find_by_name(&request.name).await?.is_some() {
            return Err(CatalogError::conflict(DUPLICATE_NAME_MESSAGE));
        }

        rules::positive_price(request.price)?;
        rules::positive_quantity(request.quantity)?;

        if !request.description.trim().is_empty() {
            rules::max_length(&request.description, self.limits.description_max_length, DESCRIPTION_FIELD)?;
            rules::description_charset(&request.description)?;
        }

        Ok(())
    }
}

/// Decodes the base64 filter expression.
///
/// Padding is optional. Spaces are read as `+`, since an unescaped `+` in a
/// query string arrives as a space.
fn decode_query(query: &str) -> CatalogResult<String> {
    if query.is_empty() {
        return Ok(String::new());
    }

    let normalized = query.trim().replace(' ', "+");
    let bytes = STANDARD_NO_PAD
        .decode(normalized.trim_end_matches('='))
        .map_err(|e| {
            warn!("Failed to decode list query '{}': {}", query, e);
            CatalogError::validation("invalid query encoding")
        })?;

    String::from_utf8(bytes).map_err(|_| CatalogError::validation("invalid query encoding"))
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn add_product(&self, request: CreateProductRequest) -> CatalogResult<Product> {
        debug!("Adding product: {}", request.name);

        self.validate(&request).await?;

        let product = NewProduct::new(request.name, request.price, request.description, request.quantity);
        let saved = self.repository.insert(&product).await?;

        info!("Product created: {} ({})", saved.product_id, saved.name);
        Ok(saved)
    }

    async fn list_products(&self, request: ListProductsRequest) -> CatalogResult<ProductListResponse> {
        debug!(
            "Listing products: page={}, limit={}, sort={}, dir={}, query={}",
            request.page, request.limit, request.sort, request.dir, request.query
        );

        let expression = decode_query(&request.query)?;
        let sort = Sort::parse(&request.sort, &request.dir)?;
        let filter = FilterPredicate::compile(&expression)?;
        let pagination = Pagination::normalize(request.page, request.limit);

        let key = cache_keys::product_list(&sort, &pagination, &filter);
        let page = self.list_cache.get_or_list(&key, &pagination, &filter, &sort).await?;

        Ok(ProductListResponse::success(page))
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheService;
    use catalog_core::{ProductPage, BLANK_DESCRIPTION};
    use chrono::Utc;
    use mockall::mock;
    use std::sync::Mutex;
    use std::time::Duration;

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

    /// In-memory product store for round-trip tests.
    #[derive(Default)]
    struct InMemoryProductRepository {
        products: Mutex<Vec<Product>>,
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn insert(&self, product: &NewProduct) -> CatalogResult<Product> {
            let mut products = self.products.lock().unwrap();
            if products.iter().any(|p| p.name == product.name) {
                return Err(CatalogError::conflict(DUPLICATE_NAME_MESSAGE));
            }
            let stored = product.clone().into_product(products.len() as i64 + 1, Utc::now());
            products.push(stored.clone());
            Ok(stored)
        }

        async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Product>> {
            Ok(self.products.lock().unwrap().iter().find(|p| p.name == name).cloned())
        }

        async fn list(&self, pagination: &Pagination, _filter: &FilterPredicate, _sort: &Sort) -> CatalogResult<ProductPage> {
            let products = self.products.lock().unwrap();
            let total = products.len() as i64;
            let items = if pagination.is_paginated() {
                products
                    .iter()
                    .skip(pagination.offset() as usize)
                    .take(pagination.limit as usize)
                    .cloned()
                    .collect()
            } else {
                products.clone()
            };
            let pagination = if pagination.is_paginated() {
                pagination.with_total_rows(total)
            } else {
                *pagination
            };
            Ok(ProductPage {
                products: items,
                pagination,
            })
        }
    }

    fn limits() -> CatalogConfig {
        CatalogConfig {
            product_name_max_length: 20,
            description_max_length: 30,
        }
    }

    fn service(repo: impl ProductRepository + 'static, cache: impl CacheInterface + 'static) -> ProductServiceImpl {
        ProductServiceImpl::new(Arc::new(repo), Arc::new(cache), limits())
    }

    fn request(name: &str, price: f64, description: &str, quantity: i32) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            price,
            description: description.to_string(),
            quantity,
        }
    }

    fn list_request(sort: &str, dir: &str, query: &str) -> ListProductsRequest {
        ListProductsRequest {
            sort: sort.to_string(),
            dir: dir.to_string(),
            query: query.to_string(),
            ..ListProductsRequest::default()
        }
    }

    async fn rejection(repo: MockRepo, request: CreateProductRequest) -> CatalogError {
        service(repo, MockCache::new()).add_product(request).await.unwrap_err()
    }

    fn repo_without_duplicates() -> MockRepo {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_insert().never();
        repo
    }

    #[tokio::test]
    async fn test_add_product_success() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name().times(1).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|product| Ok(product.clone().into_product(1, Utc::now())));

        let saved = service(repo, MockCache::new())
            .add_product(request("Desk Lamp", 45.0, "LED lamp (warm)", 2))
            .await
            .unwrap();

        assert_eq!(saved.product_id, 1);
        assert_eq!(saved.description, "LED lamp (warm)");
    }

    #[tokio::test]
    async fn test_blank_description_becomes_placeholder() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|product| Ok(product.clone().into_product(1, Utc::now())));

        let saved = service(repo, MockCache::new())
            .add_product(request("Desk Lamp", 45.0, "   ", 2))
            .await
            .unwrap();

        assert_eq!(saved.description, BLANK_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_empty_name_rejected_before_lookup() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name().never();
        repo.expect_insert().never();

        let err = rejection(repo, request("  ", 1.0, "", 1)).await;
        assert!(matches!(err, CatalogError::Validation(ref m) if m == "product name is empty"));
    }

    #[tokio::test]
    async fn test_too_long_name_rejected() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name().never();

        let err = rejection(repo, request(&"a".repeat(21), 1.0, "", 1)).await;
        assert_eq!(err.to_string(), "product name maximum characters is 20");
    }

    #[tokio::test]
    async fn test_disallowed_name_characters_rejected() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name().never();

        let err = rejection(repo, request("Lamp <b>", 1.0, "", 1)).await;
        assert_eq!(err.to_string(), "characters not allowed in column product name");
    }

    #[tokio::test]
    async fn test_duplicate_name_is_conflict() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name()
            .times(1)
            .returning(|name| Ok(Some(NewProduct::new(name, 1.0, "", 1).into_product(9, Utc::now()))));
        repo.expect_insert().never();

        let err = rejection(repo, request("Desk Lamp", 45.0, "", 2)).await;
        assert!(matches!(err, CatalogError::Conflict(ref m) if m == "product name already exist"));
    }

    #[tokio::test]
    async fn test_duplicate_checked_before_price() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name()
            .times(1)
            .returning(|name| Ok(Some(NewProduct::new(name, 1.0, "", 1).into_product(9, Utc::now()))));

        let err = rejection(repo, request("Desk Lamp", 0.0, "", 0)).await;
        assert!(matches!(err, CatalogError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_non_positive_price_rejected() {
        let err = rejection(repo_without_duplicates(), request("Desk Lamp", 0.0, "", 2)).await;
        assert_eq!(err.to_string(), "minimum price is 1");

        let err = rejection(repo_without_duplicates(), request("Desk Lamp", -5.0, "", 2)).await;
        assert_eq!(err.to_string(), "minimum price is 1");
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejected() {
        let err = rejection(repo_without_duplicates(), request("Desk Lamp", 45.0, "", 0)).await;
        assert_eq!(err.to_string(), "minimum quantity is 1");
    }

    #[tokio::test]
    async fn test_description_rules() {
        let err = rejection(repo_without_duplicates(), request("Desk Lamp", 45.0, &"d".repeat(31), 1)).await;
        assert_eq!(err.to_string(), "description maximum characters is 30");

        let err = rejection(repo_without_duplicates(), request("Desk Lamp", 45.0, "100% bright!", 1)).await;
        assert_eq!(err.to_string(), "characters not allowed in field description");
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_name()
            .returning(|_| Err(CatalogError::Database("connection reset".to_string())));

        let err = rejection(repo, request("Desk Lamp", 45.0, "", 2)).await;
        assert!(!err.is_client_error());
        assert_eq!(err.public_message(), "Internal Server Error");
    }

    #[tokio::test]
    async fn test_invalid_sort_rejected_before_any_access() {
        let service = service(MockRepo::new(), MockCache::new());

        let err = service
            .list_products(list_request("description", "asc", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = service
            .list_products(list_request("price", "upward", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_filter_rejected_before_any_access() {
        let service = service(MockRepo::new(), MockCache::new());

        // "password:x"
        let err = service
            .list_products(list_request("name", "asc", "cGFzc3dvcmQ6eA"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = service
            .list_products(list_request("name", "asc", "***"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_uses_normalized_key_and_compiled_filter() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .withf(|key| key.to_string() == "catalog:cache:product:list:sort=price&dir=desc&page=1&limit=100&query=name:%!lamp")
            .times(1)
            .returning(|_| Ok(None));
        cache.expect_set_raw().times(1).returning(|_, _, _| Ok(()));

        let mut repo = MockRepo::new();
        repo.expect_list()
            .withf(|pagination, filter, sort| {
                pagination.page == 1
                    && pagination.limit == 100
                    && sort.column == catalog_core::ProductColumn::Price
                    && matches!(filter, FilterPredicate::AnyOf { value, .. } if value == "%lamp%")
            })
            .times(1)
            .returning(|pagination, _, _| Ok(ProductPage::empty(pagination.with_total_rows(0))));

        let request = ListProductsRequest {
            page: 0,
            limit: 250,
            // "name:%!lamp" with padding
            query: "bmFtZTolIWxhbXA=".to_string(),
            ..list_request("PRICE", "DESC", "")
        };

        let response = service(repo, cache).list_products(request).await.unwrap();
        assert!(!response.error);
        assert_eq!(response.code, 200);
        assert_eq!(response.message, "Success");
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_list_round_trip() {
        let service = service(InMemoryProductRepository::default(), InMemoryCacheService::new());

        let created = service
            .add_product(request("Desk Lamp", 45.0, "LED lamp", 2))
            .await
            .unwrap();

        let response = service
            .list_products(ListProductsRequest::default())
            .await
            .unwrap();

        assert_eq!(response.data, vec![created]);
        assert_eq!(response.pagination.total_rows, 1);
        assert_eq!(response.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_unpaginated_listing() {
        let service = service(InMemoryProductRepository::default(), InMemoryCacheService::new());
        for name in ["A", "B", "C"] {
            service.add_product(request(name, 1.0, "", 1)).await.unwrap();
        }

        let response = service
            .list_products(ListProductsRequest {
                page: 0,
                limit: 0,
                ..ListProductsRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(response.data.len(), 3);
        assert_eq!((response.pagination.page, response.pagination.limit), (-1, -1));
    }

    #[test]
    fn test_decode_query() {
        assert_eq!(decode_query("").unwrap(), "");
        assert_eq!(decode_query("bmFtZTpiYXo").unwrap(), "name:baz");
        assert_eq!(decode_query("bmFtZTpiYXo=").unwrap(), "name:baz");
        // "name:>?" encodes with a '+', which a query string turns into a space
        assert_eq!(decode_query("bmFtZTo+Pw").unwrap(), "name:>?");
        assert_eq!(decode_query("bmFtZTo Pw").unwrap(), "name:>?");
        assert!(decode_query("%%%").is_err());
    }
}
