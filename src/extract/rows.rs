//! Column-to-row assembly.
//!
//! Extraction is column-oriented: one value sequence per field. This
//! module transposes a named, insertion-ordered set of columns into row
//! records. The first registered column (conventionally `dt`) fixes the
//! row count. A column registered as defaulted replicates its default
//! across every row; a column that is present but short is left short,
//! and the missing key surfaces as a typed-deserialization failure
//! upstream rather than being silently padded.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::error::{GismeteoError, Result};
use crate::extract::fields::Value;

/// One named column: either extracted values or a replicated default.
enum Column {
    Values(Vec<JsonValue>),
    Defaulted(JsonValue),
}

/// Insertion-ordered set of equal-intent columns for one forecast horizon.
#[derive(Default)]
pub struct ColumnSet {
    columns: Vec<(&'static str, Column)>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extracted column.
    pub fn push(&mut self, name: &'static str, values: Vec<Value>) {
        let values = values.into_iter().map(JsonValue::from).collect();
        self.columns.push((name, Column::Values(values)));
    }

    /// Register a timestamp column.
    pub fn push_timestamps(&mut self, name: &'static str, timestamps: Vec<i64>) {
        let values = timestamps.into_iter().map(JsonValue::from).collect();
        self.columns.push((name, Column::Values(values)));
    }

    /// Register an optional column that was entirely absent from the
    /// page; its default is replicated across every assembled row.
    pub fn push_defaulted(&mut self, name: &'static str, default: Value) {
        self.columns.push((name, Column::Defaulted(default.into())));
    }

    /// Row count, taken from the first registered column.
    pub fn row_count(&self) -> usize {
        match self.columns.first() {
            Some((_, Column::Values(values))) => values.len(),
            _ => 0,
        }
    }

    /// Transpose into row objects, preserving column insertion order.
    pub fn into_rows(self) -> Vec<Map<String, JsonValue>> {
        let count = self.row_count();
        let mut rows = vec![Map::new(); count];

        for (name, column) in self.columns {
            match column {
                Column::Values(values) => {
                    for (row, value) in rows.iter_mut().zip(values) {
                        row.insert(name.to_string(), value);
                    }
                }
                Column::Defaulted(default) => {
                    for row in rows.iter_mut() {
                        row.insert(name.to_string(), default.clone());
                    }
                }
            }
        }

        rows
    }

    /// Transpose and deserialize every row into its typed record.
    pub fn into_records<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        self.into_rows()
            .into_iter()
            .map(|row| {
                serde_json::from_value(JsonValue::Object(row))
                    .map_err(|e| GismeteoError::parse(format!("row did not match record: {e}")))
            })
            .collect()
    }
}
