//! Cache key generators for consistent key naming.

use catalog_core::{FilterPredicate, Pagination, Sort};

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "catalog:cache";

/// Generate the cache key for one product list request.
///
/// Built from resolved values only, so requests that differ just in letter
/// case or column whitespace share an entry.
#[must_use]
pub fn product_list(sort: &Sort, pagination: &Pagination, filter: &FilterPredicate) -> String {
    format!(
        "{}:product:list:sort={}&dir={}&page={}&limit={}&query={}",
        CACHE_PREFIX,
        sort.column,
        sort.direction.as_str(),
        pagination.page,
        pagination.limit,
        filter
    )
}
