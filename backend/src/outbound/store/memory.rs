//! In-memory record store.
//!
//! Tables are vectors of JSON rows behind one mutex; ids are assigned from
//! a single monotonically increasing counter. Filter evaluation reuses
//! [`Filter::matches`], so the adapter and the HTTP dialect agree on
//! predicate semantics.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::ports::{Filter, RecordStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<String, Vec<Value>>,
    next_id: i64,
}

/// Process-local record store used by tests and as the dev fallback.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: Mutex<Tables>,
}

impl MemoryRecordStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row synchronously, assigning an id when the row lacks one.
    /// Convenient for seeding fixtures.
    pub fn seed(&self, table: &str, row: Value) -> Value {
        let mut tables = self.lock();
        Self::put(&mut tables, table, row)
    }

    /// Snapshot of a table's rows.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().rows.get(table).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn put(tables: &mut Tables, table: &str, mut row: Value) -> Value {
        match row.get("id").and_then(Value::as_i64) {
            Some(id) => tables.next_id = tables.next_id.max(id + 1),
            None => {
                let id = tables.next_id.max(1);
                tables.next_id = id + 1;
                if let Some(object) = row.as_object_mut() {
                    object.insert("id".to_owned(), json!(id));
                }
            }
        }
        tables
            .rows
            .entry(table.to_owned())
            .or_default()
            .push(row.clone());
        row
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn select(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let tables = self.lock();
        Ok(tables
            .rows
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filter.matches(row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, StoreError> {
        if !row.is_object() {
            return Err(StoreError::decode("inserted row must be a JSON object"));
        }
        let mut tables = self.lock();
        Ok(Self::put(&mut tables, table, row))
    }

    async fn update(
        &self,
        table: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Vec<Value>, StoreError> {
        let Some(patch) = patch.as_object() else {
            return Err(StoreError::decode("patch must be a JSON object"));
        };
        let mut tables = self.lock();
        let mut affected = Vec::new();
        if let Some(rows) = tables.rows.get_mut(table) {
            for row in rows.iter_mut().filter(|row| filter.matches(row)) {
                if let Some(object) = row.as_object_mut() {
                    for (column, value) in patch {
                        object.insert(column.clone(), value.clone());
                    }
                }
                affected.push(row.clone());
            }
        }
        Ok(affected)
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let mut tables = self.lock();
        let mut removed = Vec::new();
        if let Some(rows) = tables.rows.get_mut(table) {
            rows.retain(|row| {
                if filter.matches(row) {
                    removed.push(row.clone());
                    false
                } else {
                    true
                }
            });
        }
        Ok(removed)
    }
}
