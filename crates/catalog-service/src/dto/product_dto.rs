//! Product DTOs.

use catalog_core::{Pagination, Product, ProductPage};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned with a successful create.
pub const CREATE_SUCCESS_MESSAGE: &str = "Success Create Product";

/// Message returned with a successful list.
pub const LIST_SUCCESS_MESSAGE: &str = "Success";

/// Request to create a new product.
///
/// Missing fields decode to their zero values and are rejected by the
/// service's validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateProductRequest {
    #[schema(example = "Desk Lamp")]
    pub name: String,

    #[schema(example = 45.0)]
    pub price: f64,

    #[schema(example = "LED lamp")]
    pub description: String,

    #[schema(example = 2)]
    pub quantity: i32,
}

/// Request to list products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProductsRequest {
    pub page: i32,
    pub limit: i32,
    /// Sort column, resolved case-insensitively.
    pub sort: String,
    /// Sort direction, `asc` or `desc`.
    pub dir: String,
    /// Base64 encoded filter expression (`col1,col2:value`).
    pub query: String,
}

impl Default for ListProductsRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Pagination::DEFAULT_LIMIT,
            sort: "product_id".to_string(),
            dir: "asc".to_string(),
            query: String::new(),
        }
    }
}

/// Response to a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateProductResponse {
    pub error: bool,
    pub code: u16,
    pub message: String,
}

impl CreateProductResponse {
    /// Creates the success response.
    #[must_use]
    pub fn success() -> Self {
        Self {
            error: false,
            code: 200,
            message: CREATE_SUCCESS_MESSAGE.to_string(),
        }
    }
}

/// Response to a product list request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub error: bool,
    pub code: u16,
    pub message: String,
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

impl ProductListResponse {
    /// Wraps a page in the success envelope.
    #[must_use]
    pub fn success(page: ProductPage) -> Self {
        Self {
            error: false,
            code: 200,
            message: LIST_SUCCESS_MESSAGE.to_string(),
            data: page.products,
            pagination: page.pagination,
        }
    }
}
