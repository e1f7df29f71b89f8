//! PostgreSQL product repository implementation.

use super::query::{count_query, list_query, PRODUCT_COLUMNS};
use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use catalog_core::{
    with_timeout, CatalogError, CatalogResult, FilterPredicate, NewProduct, Pagination, Product, ProductPage, Sort,
    DUPLICATE_NAME_MESSAGE,
};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// PostgreSQL product repository.
///
/// Every call is bounded by the configured query timeout.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: Arc<dyn DatabasePoolInterface>,
    query_timeout: Duration,
}

impl PgProductRepository {
    /// Creates a new PostgreSQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    product_id: i64,
    name: String,
    price: f64,
    description: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            name: row.name,
            price: row.price,
            description: row.description,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: &NewProduct) -> CatalogResult<Product> {
        debug!("Inserting product: {}", product.name);

        let now = Utc::now();
        let sql = format!(
            "INSERT INTO products (name, price, description, quantity, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) RETURNING {}",
            PRODUCT_COLUMNS
        );

        with_timeout(self.query_timeout, || async {
            let row = sqlx::query_as::<_, ProductRow>(&sql)
                .bind(&product.name)
                .bind(product.price)
                .bind(&product.description)
                .bind(product.quantity)
                .bind(now)
                .fetch_one(self.pool.inner())
                .await
                .map_err(|e| match CatalogError::from(e) {
                    CatalogError::Conflict(_) => CatalogError::conflict(DUPLICATE_NAME_MESSAGE),
                    other => other,
                })?;

            Ok(row.into())
        })
        .await
    }

    async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Product>> {
        debug!("Finding product by name: {}", name);

        let sql = format!("SELECT {} FROM products WHERE name = $1", PRODUCT_COLUMNS);

        with_timeout(self.query_timeout, || async {
            let row = sqlx::query_as::<_, ProductRow>(&sql)
                .bind(name)
                .fetch_optional(self.pool.inner())
                .await?;

            Ok(row.map(Product::from))
        })
        .await
    }

    async fn list(&self, pagination: &Pagination, filter: &FilterPredicate, sort: &Sort) -> CatalogResult<ProductPage> {
        debug!(
            "Listing products: page={}, limit={}, sort={} {}, filter={}",
            pagination.page,
            pagination.limit,
            sort.column,
            sort.direction.as_str(),
            filter
        );

        with_timeout(self.query_timeout, || async {
            let pagination = if pagination.is_paginated() {
                let mut count = count_query(filter);
                let total: i64 = count.build_query_scalar().fetch_one(self.pool.inner()).await?;
                pagination.with_total_rows(total)
            } else {
                *pagination
            };

            let mut query = list_query(&pagination, filter, sort);
            let rows: Vec<ProductRow> = query.build_query_as().fetch_all(self.pool.inner()).await?;

            Ok(ProductPage {
                products: rows.into_iter().map(Product::from).collect(),
                pagination,
            })
        })
        .await
    }
}
