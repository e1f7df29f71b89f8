//! Query model for product list requests.
//!
//! Caller-supplied column names and directions are resolved through the
//! allow-lists here before anything is composed into SQL. Only the
//! `as_sql()` strings of these enums ever reach query text; filter values
//! are always bound as parameters.

use crate::{CatalogError, CatalogResult};
use std::fmt;
use tracing::warn;

/// Columns of the `products` table that may be sorted or filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductColumn {
    ProductId,
    Name,
    Description,
    Price,
    Quantity,
    CreatedAt,
}

impl ProductColumn {
    /// Columns accepted by `sort`.
    pub const SORTABLE: &'static [Self] = &[
        Self::CreatedAt,
        Self::Price,
        Self::Name,
        Self::ProductId,
        Self::Quantity,
    ];

    /// Columns accepted in a filter expression.
    ///
    /// Timestamps are sortable but never filterable: `created_at` and
    /// `updated_at` have no text or numeric comparison form in the filter
    /// grammar.
    pub const FILTERABLE: &'static [Self] = &[
        Self::ProductId,
        Self::Name,
        Self::Description,
        Self::Price,
        Self::Quantity,
    ];

    /// Returns the column identifier as it appears in SQL.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::ProductId => "product_id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::CreatedAt => "created_at",
        }
    }

    /// Returns true if the column is stored as text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Name | Self::Description)
    }

    /// Resolves a sort column, case-insensitively.
    pub fn parse_sortable(raw: &str) -> CatalogResult<Self> {
        Self::lookup(raw, Self::SORTABLE)
            .ok_or_else(|| CatalogError::validation(format!("invalid sort column '{}'", raw)))
    }

    /// Resolves a filter column, case-insensitively, ignoring surrounding whitespace.
    pub fn parse_filterable(raw: &str) -> CatalogResult<Self> {
        Self::lookup(raw.trim(), Self::FILTERABLE)
            .ok_or_else(|| CatalogError::validation(format!("invalid filter column '{}'", raw.trim())))
    }

    fn lookup(raw: &str, allowed: &[Self]) -> Option<Self> {
        let raw = raw.to_ascii_lowercase();
        allowed.iter().copied().find(|c| c.as_sql() == raw)
    }
}

impl fmt::Display for ProductColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Resolves `asc` / `desc`, case-insensitively.
    pub fn parse(raw: &str) -> CatalogResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(CatalogError::validation(format!("invalid sort direction '{}'", raw))),
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Returns the canonical lower-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Resolved sort order for a list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort {
    pub column: ProductColumn,
    pub direction: SortDirection,
}

impl Sort {
    /// Creates a sort order.
    #[must_use]
    pub const fn new(column: ProductColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Resolves raw column and direction strings through the allow-lists.
    pub fn parse(column: &str, direction: &str) -> CatalogResult<Self> {
        Ok(Self {
            column: ProductColumn::parse_sortable(column)?,
            direction: SortDirection::parse(direction)?,
        })
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(ProductColumn::ProductId, SortDirection::Asc)
    }
}

/// Comparison applied by a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// Case-sensitive substring match.
    Like,
    /// Case-insensitive substring match.
    ILike,
    /// Exact equality.
    Eq,
}

impl FilterOperator {
    /// Value prefix selecting `LIKE`.
    pub const LIKE_PREFIX: &'static str = "%%";
    /// Value prefix selecting `ILIKE`.
    pub const ILIKE_PREFIX: &'static str = "%!";

    /// Returns the SQL operator.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::Eq => "=",
        }
    }

    /// Splits the operator prefix off a raw value and returns the bind value.
    fn resolve(raw: &str) -> (Self, String) {
        if let Some(rest) = raw.strip_prefix(Self::LIKE_PREFIX) {
            (Self::Like, format!("%{}%", rest))
        } else if let Some(rest) = raw.strip_prefix(Self::ILIKE_PREFIX) {
            (Self::ILike, format!("%{}%", rest))
        } else {
            (Self::Eq, raw.to_string())
        }
    }

    const fn prefix(&self) -> &'static str {
        match self {
            Self::Like => Self::LIKE_PREFIX,
            Self::ILike => Self::ILIKE_PREFIX,
            Self::Eq => "",
        }
    }
}

/// A compiled filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterPredicate {
    /// No filtering.
    #[default]
    PassThrough,
    /// `(col1 <op> value) OR (col2 <op> value) ...`
    AnyOf {
        columns: Vec<ProductColumn>,
        operator: FilterOperator,
        /// Bind value, already wrapped in `%` for substring operators.
        value: String,
    },
}

impl FilterPredicate {
    /// Compiles a decoded filter expression of the form `col1,col2:value`.
    ///
    /// An empty expression, or one without a `:` separator, compiles to
    /// [`FilterPredicate::PassThrough`]. Unknown columns are rejected.
    pub fn compile(expression: &str) -> CatalogResult<Self> {
        if expression.is_empty() {
            return Ok(Self::PassThrough);
        }

        let Some((columns_part, value_part)) = expression.split_once(':') else {
            warn!("Filter expression has no ':' separator, ignoring it: {}", expression);
            return Ok(Self::PassThrough);
        };

        let columns = columns_part
            .split(',')
            .map(ProductColumn::parse_filterable)
            .collect::<CatalogResult<Vec<_>>>()?;

        let (operator, value) = FilterOperator::resolve(value_part);

        Ok(Self::AnyOf {
            columns,
            operator,
            value,
        })
    }

    /// Returns true if the predicate filters nothing.
    #[must_use]
    pub const fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}

/// Canonical text form, used when building cache keys.
impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => Ok(()),
            Self::AnyOf {
                columns,
                operator,
                value,
            } => {
                let columns = columns
                    .iter()
                    .map(ProductColumn::as_sql)
                    .collect::<Vec<_>>()
                    .join(",");
                let value = match operator {
                    FilterOperator::Eq => value.as_str(),
                    _ => value
                        .strip_prefix('%')
                        .and_then(|v| v.strip_suffix('%'))
                        .unwrap_or(value),
                };
                write!(f, "{}:{}{}", columns, operator.prefix(), value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_like_on_multiple_columns() {
        let predicate = FilterPredicate::compile("name,description:%%foo").unwrap();
        assert_eq!(
            predicate,
            FilterPredicate::AnyOf {
                columns: vec![ProductColumn::Name, ProductColumn::Description],
                operator: FilterOperator::Like,
                value: "%foo%".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_ilike() {
        let predicate = FilterPredicate::compile("name:%!BAR").unwrap();
        assert_eq!(
            predicate,
            FilterPredicate::AnyOf {
                columns: vec![ProductColumn::Name],
                operator: FilterOperator::ILike,
                value: "%BAR%".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_equality() {
        let predicate = FilterPredicate::compile("name:baz").unwrap();
        assert_eq!(
            predicate,
            FilterPredicate::AnyOf {
                columns: vec![ProductColumn::Name],
                operator: FilterOperator::Eq,
                value: "baz".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_empty_is_pass_through() {
        assert!(FilterPredicate::compile("").unwrap().is_pass_through());
    }

    #[test]
    fn test_compile_without_separator_is_pass_through() {
        assert!(FilterPredicate::compile("name").unwrap().is_pass_through());
    }

    #[test]
    fn test_compile_splits_on_first_separator_only() {
        let predicate = FilterPredicate::compile("name:a:b").unwrap();
        match predicate {
            FilterPredicate::AnyOf { value, .. } => assert_eq!(value, "a:b"),
            FilterPredicate::PassThrough => panic!("expected a predicate"),
        }
    }

    #[test]
    fn test_compile_trims_and_lowercases_columns() {
        let predicate = FilterPredicate::compile(" Name , PRICE:10").unwrap();
        match predicate {
            FilterPredicate::AnyOf { columns, .. } => {
                assert_eq!(columns, vec![ProductColumn::Name, ProductColumn::Price]);
            }
            FilterPredicate::PassThrough => panic!("expected a predicate"),
        }
    }

    #[test]
    fn test_compile_rejects_unknown_column() {
        let err = FilterPredicate::compile("name; DROP TABLE products:x").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = FilterPredicate::compile("created_at:2024").unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        assert!(FilterPredicate::compile("name,:x").is_err());
    }

    #[test]
    fn test_timestamps_are_not_filterable() {
        for raw in ["created_at:2024", "updated_at:x", "name,updated_at:%x"] {
            let err = FilterPredicate::compile(raw).unwrap_err();
            assert!(matches!(err, CatalogError::Validation(_)), "{raw}");
        }
        assert!(!ProductColumn::FILTERABLE.contains(&ProductColumn::CreatedAt));
        assert!(ProductColumn::SORTABLE.contains(&ProductColumn::CreatedAt));
    }

    #[test]
    fn test_display_is_canonical() {
        let a = FilterPredicate::compile(" NAME ,description:%%foo").unwrap();
        let b = FilterPredicate::compile("name,description:%%foo").unwrap();
        assert_eq!(a.to_string(), "name,description:%%foo");
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(FilterPredicate::PassThrough.to_string(), "");
        assert_eq!(FilterPredicate::compile("name:%!x").unwrap().to_string(), "name:%!x");
    }

    #[test]
    fn test_sort_parse() {
        let sort = Sort::parse("Price", "DESC").unwrap();
        assert_eq!(sort.column, ProductColumn::Price);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.direction.as_sql(), "DESC");
    }

    #[test]
    fn test_sort_rejects_unknown_values() {
        assert!(Sort::parse("description", "asc").is_err());
        assert!(Sort::parse("name", "sideways").is_err());
        assert!(Sort::parse("", "asc").is_err());
        assert!(Sort::parse("name; --", "asc").is_err());
    }

    #[test]
    fn test_text_columns() {
        assert!(ProductColumn::Name.is_text());
        assert!(ProductColumn::Description.is_text());
        assert!(!ProductColumn::Price.is_text());
        assert!(!ProductColumn::ProductId.is_text());
    }
}
