//! Product entity.

use crate::Pagination;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Description stored when a product is created with a blank description.
pub const BLANK_DESCRIPTION: &str = "-";

/// Message reported when a product name is already taken.
pub const DUPLICATE_NAME_MESSAGE: &str = "product name already exist";

/// A product stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    /// Store-assigned identifier.
    pub product_id: i64,

    /// Unique product name.
    pub name: String,

    /// Unit price, always positive.
    pub price: f64,

    /// Free-form description (`-` when none was given).
    pub description: String,

    /// Units in stock, always positive.
    pub quantity: i32,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A validated product that has not been persisted yet.
///
/// Timestamps and the identifier are assigned by the store at write time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub quantity: i32,
}

impl NewProduct {
    /// Creates a new product, replacing a blank description with the `-` placeholder.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64, description: impl Into<String>, quantity: i32) -> Self {
        let description = description.into();
        let description = if description.trim().is_empty() {
            BLANK_DESCRIPTION.to_string()
        } else {
            description
        };

        Self {
            name: name.into(),
            price,
            description,
            quantity,
        }
    }

    /// Materializes the product with store-assigned identity and timestamps.
    #[must_use]
    pub fn into_product(self, product_id: i64, now: DateTime<Utc>) -> Product {
        Product {
            product_id,
            name: self.name,
            price: self.price,
            description: self.description,
            quantity: self.quantity,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One page of products together with the pagination it was fetched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

impl ProductPage {
    /// Creates an empty page.
    #[must_use]
    pub const fn empty(pagination: Pagination) -> Self {
        Self {
            products: Vec::new(),
            pagination,
        }
    }

    /// Returns true if the page holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
