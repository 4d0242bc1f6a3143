//! Port for the remote record store.
//!
//! The workflows only need a narrow contract against a hosted relational
//! store: filtered select, insert, update, and delete by table name. Rows
//! travel as JSON objects and are decoded into domain types at the call
//! site; any adapter failure is wrapped as the `StoreFailure` domain error
//! by the workflow layer.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by record store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached or the request did not complete.
    #[error("record store transport failed: {message}")]
    Transport { message: String },
    /// The store answered with a non-success status.
    #[error("record store returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The store answered with a payload that could not be decoded.
    #[error("record store payload could not be decoded: {message}")]
    Decode { message: String },
}

impl StoreError {
    /// Transport-level failure (connect, timeout, broken stream).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Non-success HTTP status from the store.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Undecodable store payload.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// One predicate of a [`Filter`] conjunction.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Column equals the value.
    Eq(String, Value),
    /// Column is numerically greater than the value.
    Gt(String, Value),
    /// Column is SQL `NULL` (or absent from the row).
    IsNull(String),
}

/// Conjunction of column predicates applied to a table read or mutation.
///
/// # Examples
/// ```
/// use backend::domain::ports::Filter;
///
/// let filter = Filter::new().eq("id", 7).is_null("eaten_at");
/// assert_eq!(filter.conditions().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// Empty filter matching every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column = value`.
    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Eq(column.to_owned(), value.into()));
        self
    }

    /// Require `column > value` (numeric comparison).
    #[must_use]
    pub fn gt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Gt(column.to_owned(), value.into()));
        self
    }

    /// Require `column IS NULL`; a column missing from the row also matches.
    #[must_use]
    pub fn is_null(mut self, column: &str) -> Self {
        self.conditions.push(Condition::IsNull(column.to_owned()));
        self
    }

    /// The predicates in insertion order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Evaluate the conjunction against a JSON row.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        self.conditions.iter().all(|condition| match condition {
            Condition::Eq(column, value) => row.get(column) == Some(value),
            Condition::Gt(column, value) => match (
                row.get(column).and_then(Value::as_i64),
                value.as_i64(),
            ) {
                (Some(actual), Some(bound)) => actual > bound,
                _ => false,
            },
            Condition::IsNull(column) => {
                row.get(column).is_none_or(Value::is_null)
            }
        })
    }
}

/// Narrow contract against the hosted relational store.
///
/// All operations may fail with a [`StoreError`]; no retries happen at this
/// level and none are layered on top by the workflows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read rows from `table` matching `filter`.
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Insert one row into `table`, returning the row as stored (with its
    /// assigned id).
    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError>;

    /// Patch rows in `table` matching `filter`, returning the affected rows.
    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Vec<Value>, StoreError>;

    /// Delete rows from `table` matching `filter`, returning the removed
    /// rows.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError>;
}

/// Decode a single store row into a domain type.
///
/// # Errors
/// Returns [`StoreError::Decode`] when the row does not match the expected
/// schema.
pub fn decode_row<T: DeserializeOwned>(row: Value) -> Result<T, StoreError> {
    serde_json::from_value(row).map_err(|error| StoreError::decode(error.to_string()))
}

/// Decode a batch of store rows into domain types.
///
/// # Errors
/// Returns [`StoreError::Decode`] on the first row that does not match the
/// expected schema.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
    rows.into_iter().map(decode_row).collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Filter::new(), json!({"id": 1}), true)]
    #[case(Filter::new().eq("id", 1), json!({"id": 1}), true)]
    #[case(Filter::new().eq("id", 1), json!({"id": 2}), false)]
    #[case(Filter::new().eq("id", 1), json!({}), false)]
    #[case(Filter::new().gt("count", 0), json!({"count": 3}), true)]
    #[case(Filter::new().gt("count", 0), json!({"count": 0}), false)]
    #[case(Filter::new().gt("count", 0), json!({"count": "three"}), false)]
    #[case(Filter::new().is_null("eaten_at"), json!({"eaten_at": null}), true)]
    #[case(Filter::new().is_null("eaten_at"), json!({}), true)]
    #[case(Filter::new().is_null("eaten_at"), json!({"eaten_at": "2026-02-01T12:00:00Z"}), false)]
    #[case(
        Filter::new().eq("user_id", 1).is_null("eaten_at"),
        json!({"user_id": 1, "eaten_at": null}),
        true
    )]
    #[case(
        Filter::new().eq("user_id", 1).is_null("eaten_at"),
        json!({"user_id": 1, "eaten_at": "2026-02-01T12:00:00Z"}),
        false
    )]
    fn filters_evaluate_as_conjunctions(
        #[case] filter: Filter,
        #[case] row: Value,
        #[case] expected: bool,
    ) {
        assert_eq!(filter.matches(&row), expected);
    }

    #[test]
    fn decode_rows_surfaces_schema_mismatches() {
        let rows = vec![json!({"id": 1, "name": "Margherita", "price": 30})];
        let slices: Vec<crate::domain::PizzaSlice> =
            decode_rows(rows).expect("rows should decode");
        assert_eq!(slices[0].price, 30);

        let bad = decode_rows::<crate::domain::PizzaSlice>(vec![json!({"id": 1})]);
        assert!(matches!(bad, Err(StoreError::Decode { .. })));
    }
}
