//! Product list query parameters.

use catalog_service::ListProductsRequest;
use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

/// Query parameters of `GET /product/list`.
///
/// Absent or empty parameters take the list defaults; explicit values,
/// including `page=0&limit=0`, are passed through untouched. A non-numeric
/// `page` or `limit` is rejected.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, starting at 1.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i32>,
    /// Page size, capped at 100.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i32>,
    /// Sort column.
    pub sort: Option<String>,
    /// Sort direction, `asc` or `desc`.
    pub dir: Option<String>,
    /// Base64 encoded filter expression.
    pub query: Option<String>,
}

/// Reads `?page=` as an absent parameter.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl From<ListQuery> for ListProductsRequest {
    fn from(query: ListQuery) -> Self {
        let defaults = Self::default();
        Self {
            page: query.page.unwrap_or(defaults.page),
            limit: query.limit.unwrap_or(defaults.limit),
            sort: query.sort.unwrap_or(defaults.sort),
            dir: query.dir.unwrap_or(defaults.dir),
            query: query.query.unwrap_or(defaults.query),
        }
    }
}
