//! Repository trait definitions.

use catalog_core::{CatalogResult, FilterPredicate, Interface, NewProduct, Pagination, Product, ProductPage, Sort};
use async_trait::async_trait;

/// Product store.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Persists a new product and returns the stored row.
    ///
    /// A duplicate name fails with `CatalogError::Conflict`.
    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product>;

    /// Finds a product by its exact name.
    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Product>>;

    /// Lists products matching `filter`, ordered by `sort`.
    ///
    /// In paginated mode the returned pagination carries the totals of the
    /// filtered set; in unpaginated mode every matching row is returned and
    /// totals stay zero.
    async fn list(&self, pagination: &Pagination, filter: &FilterPredicate, sort: &Sort) -> CatalogResult<ProductPage>;
}
