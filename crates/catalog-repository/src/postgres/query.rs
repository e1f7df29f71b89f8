//! SQL composition for product list queries.
//!
//! Identifiers come only from `ProductColumn` / `SortDirection`; every
//! caller-supplied value is bound.

use catalog_core::{FilterPredicate, Pagination, ProductColumn, Sort};
use sqlx::{Postgres, QueryBuilder};

/// Columns selected for a product row.
pub const PRODUCT_COLUMNS: &str = "product_id, name, price, description, quantity, created_at, updated_at";

/// Builds the `SELECT` for one page of products.
#[must_use]
pub fn list_query(pagination: &Pagination, filter: &FilterPredicate, sort: &Sort) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
    push_filter(&mut qb, filter);
    push_order(&mut qb, sort);
    push_page(&mut qb, pagination);
    qb
}

/// Builds the `COUNT(*)` over the filtered set.
#[must_use]
pub fn count_query(filter: &FilterPredicate) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filter(&mut qb, filter);
    qb
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &FilterPredicate) {
    let FilterPredicate::AnyOf {
        columns,
        operator,
        value,
    } = filter
    else {
        return;
    };

    qb.push(" WHERE (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(column.as_sql());
        if !column.is_text() {
            qb.push("::TEXT");
        }
        qb.push(" ");
        qb.push(operator.as_sql());
        qb.push(" ");
        qb.push_bind(value.clone());
    }
    qb.push(")");
}

fn push_order(qb: &mut QueryBuilder<'static, Postgres>, sort: &Sort) {
    qb.push(" ORDER BY ");
    qb.push(sort.column.as_sql());
    qb.push(" ");
    qb.push(sort.direction.as_sql());
    // stable order across pages
    if sort.column != ProductColumn::ProductId {
        qb.push(", product_id ASC");
    }
}

fn push_page(qb: &mut QueryBuilder<'static, Postgres>, pagination: &Pagination) {
    if !pagination.is_paginated() {
        return;
    }
    qb.push(" LIMIT ");
    qb.push_bind(i64::from(pagination.limit));
    qb.push(" OFFSET ");
    qb.push_bind(pagination.offset());
}
