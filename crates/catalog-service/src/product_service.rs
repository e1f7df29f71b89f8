//! Product service trait definition.

use crate::dto::{CreateProductRequest, ListProductsRequest, ProductListResponse};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, Product};

/// Product service trait.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Validates and stores a new product.
    async fn add_product(&self, request: CreateProductRequest) -> CatalogResult<Product>;

    /// Lists products, serving repeated requests from the cache.
    async fn list_products(&self, request: ListProductsRequest) -> CatalogResult<ProductListResponse>;
}
