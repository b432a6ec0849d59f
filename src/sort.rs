/// DataGrid Ordering Engine
///
/// Sorts the filtered record set by a single key and direction. Sorting is
/// stable (equal keys keep their original relative order), non-mutating (it
/// reorders an index mapping, never the records), and total: null or missing
/// values sort after every non-null value regardless of direction.
///
/// The comparison value for each record resolves through the matching column
/// descriptor, so virtual columns (composite keys, value getters) sort by
/// exactly what they display. A key with no matching column falls back to a
/// direct field lookup.

use crate::column::ColumnDescriptor;
use crate::record::{display_text, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first; the exact reverse of the ascending comparator for
    /// non-null values, so tie-break behavior matches between directions.
    Descending,
}

/// Resolves the comparison value for one record and sort key.
///
/// Uses the first column answering for the key (by `data_key` equality or
/// `data_keys` membership) with the shared derivation precedence; a key with
/// no matching column reads the field directly. An unresolvable key yields
/// `Value::Null`, which sorts last rather than failing the pipeline.
pub fn resolve_sort_value(record: &Record, columns: &[ColumnDescriptor], key: &str) -> Value {
    match columns.iter().find(|column| column.matches_key(key)) {
        Some(column) => column.resolve_value(record),
        None => record.get(key).cloned().unwrap_or(Value::Null),
    }
}

/// Compares two non-null resolved values.
///
/// Strings compare case-insensitively, numbers numerically, booleans by
/// value; anything else compares by its text form.
fn compare_non_null(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (a, b) => display_text(a).cmp(&display_text(b)),
    }
}

/// Full comparator: null handling sits outside the direction reversal, so
/// nulls land last in both directions.
fn compare_resolved(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Ascending => compare_non_null(a, b),
            SortDirection::Descending => compare_non_null(a, b).reverse(),
        },
    }
}

/// Orders an index mapping over the dataset by the given key and direction.
///
/// `indices` is typically the output of the predicate stage; the result is a
/// permutation of it. An empty key or unset direction returns the mapping
/// unchanged (original dataset order).
pub fn sort_indices(
    records: &[Record],
    columns: &[ColumnDescriptor],
    key: &str,
    direction: Option<SortDirection>,
    mut indices: Vec<usize>,
) -> Vec<usize> {
    let direction = match direction {
        Some(direction) if !key.is_empty() => direction,
        _ => return indices,
    };

    // Resolve each key once; comparisons then run over the cache.
    let resolved: Vec<Value> = records
        .iter()
        .map(|record| resolve_sort_value(record, columns, key))
        .collect();

    indices.sort_by(|&a, &b| compare_resolved(&resolved[a], &resolved[b], direction));
    indices
}

/// Convenience wrapper sorting an owned record set directly.
pub fn sort_records(
    records: &[Record],
    columns: &[ColumnDescriptor],
    key: &str,
    direction: Option<SortDirection>,
) -> Vec<Record> {
    let indices = (0..records.len()).collect();
    sort_indices(records, columns, key, direction, indices)
        .into_iter()
        .map(|index| records[index].clone())
        .collect()
}
