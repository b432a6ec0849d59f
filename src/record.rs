/// DataGrid Record Primitives
///
/// A Record is one row of the dataset: an opaque field-to-value mapping with
/// no fixed schema. Values are plain JSON (string, number, boolean, null, or
/// nested object/array). Records are immutable once loaded; identity is
/// positional within the dataset.
///
/// This module also hosts the text coercions shared by the search, sort, and
/// display stages, so that all three agree on how a JSON value reads as text.

use serde_json::{Map, Value};

/// One row of the dataset: field name to JSON value.
pub type Record = Map<String, Value>;

/// Converts a JSON value into the text the grid works with.
///
/// Strings pass through unquoted, numbers and booleans use their canonical
/// form, null becomes the empty string, and nested objects/arrays fall back
/// to their compact JSON form.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use datagrid::record::display_text;
///
/// assert_eq!(display_text(&json!("Amadou")), "Amadou");
/// assert_eq!(display_text(&json!(7)), "7");
/// assert_eq!(display_text(&json!(null)), "");
/// ```
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Looks up a field and coerces it to text.
///
/// Missing fields and explicit nulls both coerce to the empty string, so the
/// predicate and ordering stages never have to special-case sparse records.
pub fn field_text(record: &Record, key: &str) -> String {
    record.get(key).map(display_text).unwrap_or_default()
}

/// Reinterprets a JSON value as a record.
///
/// Returns `None` when the value is not a JSON object; a record is a
/// field-to-value mapping by definition.
pub fn into_record(value: Value) -> Option<Record> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Record {
        into_record(json!({
            "name": "Amadou",
            "dept": "Info",
            "exp": 3,
            "active": true,
            "note": null,
        }))
        .unwrap()
    }

    #[test]
    fn test_display_text_scalars() {
        assert_eq!(display_text(&json!("hello")), "hello");
        assert_eq!(display_text(&json!(42)), "42");
        assert_eq!(display_text(&json!(2.5)), "2.5");
        assert_eq!(display_text(&json!(false)), "false");
        assert_eq!(display_text(&json!(null)), "");
    }

    #[test]
    fn test_display_text_nested() {
        assert_eq!(display_text(&json!([1, 2])), "[1,2]");
        assert_eq!(display_text(&json!({"a": 1})), "{\"a\":1}");
    }

    #[test]
    fn test_field_text_missing_and_null() {
        let record = sample();
        assert_eq!(field_text(&record, "name"), "Amadou");
        assert_eq!(field_text(&record, "exp"), "3");
        assert_eq!(field_text(&record, "note"), "");
        assert_eq!(field_text(&record, "no_such_field"), "");
    }

    #[test]
    fn test_into_record_rejects_non_objects() {
        assert!(into_record(json!([1, 2, 3])).is_none());
        assert!(into_record(json!("scalar")).is_none());
        assert!(into_record(json!({"ok": true})).is_some());
    }
}
