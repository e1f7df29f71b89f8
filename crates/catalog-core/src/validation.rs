//! Validation utilities.
//!
//! Product input is checked field by field in a fixed order, so the rules
//! here are plain functions rather than a `#[derive(Validate)]` struct. Each
//! rule returns a `validator::ValidationError` whose message is the text
//! shown to the caller.

use crate::CatalogError;
use validator::ValidationError;

/// Converts a `validator::ValidationError` to `CatalogError::Validation`.
///
/// The error message is used when present, otherwise the error code.
#[must_use]
pub fn validation_error_to_catalog_error(error: ValidationError) -> CatalogError {
    let message = error
        .message
        .as_ref()
        .map_or_else(|| error.code.to_string(), ToString::to_string);
    CatalogError::Validation(message)
}

impl From<ValidationError> for CatalogError {
    fn from(error: ValidationError) -> Self {
        validation_error_to_catalog_error(error)
    }
}

/// Common validation functions.
pub mod rules {
    use std::borrow::Cow;
    use validator::ValidationError;

    fn fail(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
        ValidationError::new(code).with_message(message.into())
    }

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(fail("not_blank", format!("{} is empty", field)));
        }
        Ok(())
    }

    /// Validates the byte length of a string.
    pub fn max_length(value: &str, max: usize, field: &str) -> Result<(), ValidationError> {
        if value.len() > max {
            return Err(fail("max_length", format!("{} maximum characters is {}", field, max)));
        }
        Ok(())
    }

    /// Validates that a product name only uses `[A-Za-z0-9 _.,'-]`.
    pub fn product_name_charset(name: &str) -> Result<(), ValidationError> {
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | ',' | '\'' | '-');
        if !name.chars().all(allowed) {
            return Err(fail("charset", "characters not allowed in column product name"));
        }
        Ok(())
    }

    /// Validates that a description only uses word characters, whitespace and `.,-/:;()`.
    pub fn description_charset(description: &str) -> Result<(), ValidationError> {
        let allowed = |c: char| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '_' | ' ' | '\t' | '\n' | '\r' | '\x0c' | '.' | ',' | '-' | '/' | ':' | ';' | '(' | ')'
                )
        };
        if !description.chars().all(allowed) {
            return Err(fail("charset", "characters not allowed in field description"));
        }
        Ok(())
    }

    /// Validates that a price is strictly positive.
    pub fn positive_price(price: f64) -> Result<(), ValidationError> {
        // NaN fails too.
        if !(price > 0.0) {
            return Err(fail("min_price", "minimum price is 1"));
        }
        Ok(())
    }

    /// Validates that a quantity is strictly positive.
    pub fn positive_quantity(quantity: i32) -> Result<(), ValidationError> {
        if quantity <= 0 {
            return Err(fail("min_quantity", "minimum quantity is 1"));
        }
        Ok(())
    }
}
