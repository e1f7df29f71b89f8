//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// Normalized pagination for a list request, plus the totals computed by the store.
///
/// A `page`/`limit` of `-1` marks unpaginated mode: the store applies no
/// limit or offset and does not count rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Pagination {
    /// Rows per page.
    pub limit: i32,
    /// The page number (1-indexed).
    pub page: i32,
    /// Total number of matching rows.
    pub total_rows: i64,
    /// Total number of pages.
    pub total_pages: i32,
}

impl Pagination {
    /// The default page size.
    pub const DEFAULT_LIMIT: i32 = 10;
    /// The maximum allowed page size.
    pub const MAX_LIMIT: i32 = 100;
    /// Marker used for both page and limit in unpaginated mode.
    pub const UNPAGINATED: i32 = -1;

    /// Normalizes raw page/limit values.
    ///
    /// `(0, 0)` selects unpaginated mode. Otherwise a non-positive page
    /// becomes 1, a limit above 100 becomes 100 and a non-positive limit
    /// becomes 10.
    #[must_use]
    pub fn normalize(page: i32, limit: i32) -> Self {
        if page == 0 && limit == 0 {
            return Self::unpaginated();
        }

        let page = if page <= 0 { 1 } else { page };
        let limit = match limit {
            l if l > Self::MAX_LIMIT => Self::MAX_LIMIT,
            l if l <= 0 => Self::DEFAULT_LIMIT,
            l => l,
        };

        Self {
            limit,
            page,
            total_rows: 0,
            total_pages: 0,
        }
    }

    /// Returns pagination that fetches every row.
    #[must_use]
    pub const fn unpaginated() -> Self {
        Self {
            limit: Self::UNPAGINATED,
            page: Self::UNPAGINATED,
            total_rows: 0,
            total_pages: 0,
        }
    }

    /// Returns true if limit/offset should be applied.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.limit > 0 && self.page > 0
    }

    /// Returns the row offset for database queries.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if self.is_paginated() {
            i64::from(self.page - 1) * i64::from(self.limit)
        } else {
            0
        }
    }

    /// Returns a copy carrying `total_rows` and the derived page count.
    #[must_use]
    pub fn with_total_rows(self, total_rows: i64) -> Self {
        let total_pages = if self.limit > 0 {
            let limit = i64::from(self.limit);
            i32::try_from((total_rows + limit - 1) / limit).unwrap_or(i32::MAX)
        } else {
            0
        };

        Self {
            total_rows,
            total_pages,
            ..self
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::normalize(1, Self::DEFAULT_LIMIT)
    }
}
