//! Data store access for the hosted database.
//!
//! # Tables
//!
//! The schema is owned by the hosted service; this site only reads and
//! appends:
//!
//! - `places` - itinerary destinations (read)
//! - `products` - marketplace listings (read)
//! - `feedback` - visitor feedback with sentiment score (insert, read scores)
//! - `profiles` - per-user role, keyed by identity-provider user id (read)
//!
//! # Architecture
//!
//! Handlers never talk to the hosted service directly. They go through the
//! [`DataStore`] trait so the store can be swapped for an in-memory stub in
//! tests. The production implementation is [`crate::supabase::SupabaseClient`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Table names used by the site.
pub mod tables {
    pub const PLACES: &str = "places";
    pub const PRODUCTS: &str = "products";
    pub const FEEDBACK: &str = "feedback";
    pub const PROFILES: &str = "profiles";
}

/// Errors from the data store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Row selection for [`DataStore::select`].
///
/// Equality filters only; that is all the site needs.
///
/// ```
/// use jharkhand_tourism_web::db::Filter;
///
/// let filter = Filter::eq("id", "42").columns("role");
/// assert_eq!(filter.selected_columns(), "role");
/// assert_eq!(filter.conditions(), &[("id".to_string(), "42".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    columns: String,
    conditions: Vec<(String, String)>,
}

impl Default for Filter {
    fn default() -> Self {
        Self::all()
    }
}

impl Filter {
    /// Select every column of every row.
    #[must_use]
    pub fn all() -> Self {
        Self {
            columns: "*".to_string(),
            conditions: Vec::new(),
        }
    }

    /// Select rows where `column` equals `value`.
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::all().and_eq(column, value)
    }

    /// Add another equality condition.
    #[must_use]
    pub fn and_eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    /// Restrict the returned columns (comma separated).
    #[must_use]
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Columns to return.
    #[must_use]
    pub fn selected_columns(&self) -> &str {
        &self.columns
    }

    /// Equality conditions as `(column, value)` pairs.
    #[must_use]
    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// Whether a JSON row satisfies every condition.
    ///
    /// Used by in-memory stores; string and numeric cells compare by their
    /// textual form.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        self.conditions.iter().all(|(column, expected)| {
            row.get(column).is_some_and(|cell| match cell {
                Value::String(s) => s == expected,
                Value::Null => false,
                other => other.to_string() == *expected,
            })
        })
    }
}

/// Narrow select/insert interface to the hosted relational store.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Fetch rows of `table` matching `filter`, as raw JSON objects.
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Append one row to `table`.
    async fn insert(&self, table: &str, row: Value) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_filter_all_selects_everything() {
        let filter = Filter::all();
        assert_eq!(filter.selected_columns(), "*");
        assert!(filter.conditions().is_empty());
        assert!(filter.matches(&json!({"anything": 1})));
    }

    #[test]
    fn test_filter_matches_strings_and_numbers() {
        let row = json!({"id": 7, "slug": "hundru-falls"});
        assert!(Filter::eq("id", "7").matches(&row));
        assert!(Filter::eq("slug", "hundru-falls").matches(&row));
        assert!(!Filter::eq("slug", "dassam-falls").matches(&row));
        assert!(!Filter::eq("missing", "x").matches(&row));
        assert!(Filter::eq("id", "7").and_eq("slug", "hundru-falls").matches(&row));
    }

    #[test]
    fn test_filter_null_never_matches() {
        let row = json!({"role": null});
        assert!(!Filter::eq("role", "null").matches(&row));
    }
}
