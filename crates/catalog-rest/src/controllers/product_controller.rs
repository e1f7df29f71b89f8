//! Product controller.

use crate::{
    extractors::{ApiJson, ApiQuery, ListQuery},
    responses::{ok, ApiResult, ErrorEnvelope},
    state::AppState,
};
use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use catalog_service::{CreateProductRequest, CreateProductResponse, ProductListResponse};
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_product))
        .route("/list", get(list_products))
}

/// Create a new product.
#[utoipa::path(
    post,
    path = "/product/create",
    tag = "product",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Invalid product", body = ErrorEnvelope),
        (status = 409, description = "Product name already exists", body = ErrorEnvelope),
        (status = 500, description = "Internal error", body = ErrorEnvelope)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProductRequest>,
) -> ApiResult<CreateProductResponse> {
    debug!("Create product request: {}", request.name);

    state.product_service.add_product(request).await?;
    ok(CreateProductResponse::success())
}

/// List products with pagination, sorting and filtering.
#[utoipa::path(
    get,
    path = "/product/list",
    tag = "product",
    params(ListQuery),
    responses(
        (status = 200, description = "A page of products", body = ProductListResponse),
        (status = 400, description = "Invalid sort or filter", body = ErrorEnvelope),
        (status = 500, description = "Internal error", body = ErrorEnvelope)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<ProductListResponse> {
    debug!("List products request: {:?}", query);

    let response = state.product_service.list_products(query.into()).await?;
    ok(response)
}
