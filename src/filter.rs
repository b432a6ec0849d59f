/// DataGrid Predicate Engine
///
/// The filtering stage. A record is included iff it satisfies the free-text
/// search predicate (OR across the configured search fields, case-insensitive
/// substring) AND every active per-field filter (case-insensitive exact match
/// on the string form of the field).
///
/// Filtering produces an index mapping into the raw dataset rather than a
/// copied record set, so downstream stages observe a subset by construction
/// and the raw dataset is never touched.

use crate::column::ValueGetter;
use crate::record::{display_text, field_text, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Sentinel filter value meaning "no constraint".
pub const ALL_VALUE: &str = "";

/// One field the free-text search runs over.
///
/// Either a plain field name, a composite of several fields (searched over
/// their concatenation, joined by single spaces), or a derived value.
#[derive(Clone)]
pub enum SearchField {
    /// Plain field lookup.
    Key(String),
    /// Concatenation of several fields, joined by single spaces.
    Keys(Vec<String>),
    /// Derived value computed from the whole record.
    Getter(ValueGetter),
}

impl SearchField {
    /// Searches a single field.
    pub fn key(key: impl Into<String>) -> Self {
        SearchField::Key(key.into())
    }

    /// Searches across the concatenation of several fields.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchField::Keys(keys.into_iter().map(Into::into).collect())
    }

    /// Searches a value derived from the whole record.
    pub fn getter<F>(getter: F) -> Self
    where
        F: Fn(&Record) -> Value + 'static,
    {
        SearchField::Getter(Rc::new(getter))
    }

    /// The text the search predicate runs over for one record.
    /// Missing and null fields coerce to empty strings.
    pub fn text(&self, record: &Record) -> String {
        match self {
            SearchField::Key(key) => field_text(record, key),
            SearchField::Keys(keys) => keys
                .iter()
                .map(|key| field_text(record, key))
                .collect::<Vec<_>>()
                .join(" "),
            SearchField::Getter(getter) => display_text(&getter(record)),
        }
    }
}

impl From<&str> for SearchField {
    fn from(key: &str) -> Self {
        SearchField::key(key)
    }
}

/// One selectable filter option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        FilterOption {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The "all" sentinel option: selecting it clears the constraint.
    pub fn all() -> Self {
        FilterOption::new("All", ALL_VALUE)
    }
}

/// Where a filter's option set comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOptions {
    /// Explicitly provided options, used verbatim.
    Static(Vec<FilterOption>),
    /// Distinct values of the field across the raw dataset, with the "all"
    /// sentinel prepended.
    #[default]
    Dynamic,
}

/// Configuration for one exact-match field filter.
///
/// # Examples
///
/// ```
/// use datagrid::{FilterConfig, FilterOption};
///
/// let dept = FilterConfig::dynamic("dept", "Department").with_tag("blue");
/// let status = FilterConfig::with_options(
///     "status",
///     "Status",
///     vec![
///         FilterOption::all(),
///         FilterOption::new("Active", "active"),
///         FilterOption::new("Suspended", "suspended"),
///     ],
/// );
/// assert_eq!(dept.field, "dept");
/// assert_eq!(status.label, "Status");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Record field the filter matches against.
    pub field: String,
    /// Display label.
    pub label: String,
    /// Option source.
    #[serde(default)]
    pub options: FilterOptions,
    /// Tag color hint for the presentation layer.
    #[serde(default)]
    pub tag: Option<String>,
}

impl FilterConfig {
    /// A filter whose options derive from the dataset.
    pub fn dynamic(field: impl Into<String>, label: impl Into<String>) -> Self {
        FilterConfig {
            field: field.into(),
            label: label.into(),
            options: FilterOptions::Dynamic,
            tag: None,
        }
    }

    /// A filter with an explicitly provided option list.
    pub fn with_options(
        field: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        FilterConfig {
            field: field.into(),
            label: label.into(),
            options: FilterOptions::Static(options),
            tag: None,
        }
    }

    /// Sets the tag color hint.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Resolves the option list against a dataset.
    ///
    /// Dynamic filters must always be given the raw, pre-filter dataset so
    /// the option list never shrinks as the user narrows the view.
    pub fn options_for(&self, records: &[Record]) -> Vec<FilterOption> {
        match &self.options {
            FilterOptions::Static(options) => options.clone(),
            FilterOptions::Dynamic => dynamic_options(records, &self.field),
        }
    }
}

/// Derives the distinct values of `field` across the dataset as filter
/// options, "all" sentinel first. Values are returned in string order so the
/// option list is deterministic across reloads.
pub fn dynamic_options(records: &[Record], field: &str) -> Vec<FilterOption> {
    let mut distinct = BTreeSet::new();
    for record in records {
        let text = field_text(record, field);
        if !text.is_empty() {
            distinct.insert(text);
        }
    }

    let mut options = Vec::with_capacity(distinct.len() + 1);
    options.push(FilterOption::all());
    options.extend(distinct.into_iter().map(|value| FilterOption::new(value.clone(), value)));
    options
}

/// Free-text predicate: true when the search text is empty, or when any
/// search field's derived text contains it case-insensitively.
pub fn matches_search(record: &Record, search_text: &str, fields: &[SearchField]) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let needle = search_text.to_lowercase();
    fields
        .iter()
        .any(|field| field.text(record).to_lowercase().contains(&needle))
}

/// Per-field filter predicate: true when every active entry matches the
/// string form of the record's field case-insensitively and exactly.
/// Entries with an empty value impose no constraint.
pub fn matches_filters(record: &Record, active: &HashMap<String, String>) -> bool {
    active.iter().all(|(field, selected)| {
        if selected.is_empty() {
            return true;
        }
        field_text(record, field).to_lowercase() == selected.to_lowercase()
    })
}

/// Runs both predicates over the dataset, returning the indices of the
/// records that satisfy the search AND every active filter. The result is a
/// subset of `0..records.len()` in dataset order.
pub fn filter_indices(
    records: &[Record],
    search_text: &str,
    active: &HashMap<String, String>,
    fields: &[SearchField],
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            matches_search(record, search_text, fields) && matches_filters(record, active)
        })
        .map(|(index, _)| index)
        .collect()
}

/// Convenience wrapper returning the matching records themselves.
pub fn filter_records(
    records: &[Record],
    search_text: &str,
    active: &HashMap<String, String>,
    fields: &[SearchField],
) -> Vec<Record> {
    filter_indices(records, search_text, active, fields)
        .into_iter()
        .map(|index| records[index].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::into_record;
    use serde_json::json;

    fn staff() -> Vec<Record> {
        vec![
            into_record(json!({"name": "Amadou", "dept": "Info", "exp": 3})).unwrap(),
            into_record(json!({"name": "Fatou", "dept": "Info", "exp": 7})).unwrap(),
            into_record(json!({"name": "Eve", "dept": "Math", "exp": 1})).unwrap(),
        ]
    }

    fn no_filters() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_search_substring_case_insensitive() {
        let records = staff();
        let fields = vec![SearchField::key("name")];

        // "a" matches Amadou and Fatou but not Eve.
        let hits = filter_indices(&records, "a", &no_filters(), &fields);
        assert_eq!(hits, vec![0, 1]);

        let hits = filter_indices(&records, "EVE", &no_filters(), &fields);
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn test_empty_search_passes_everything() {
        let records = staff();
        let fields = vec![SearchField::key("name")];
        let hits = filter_indices(&records, "", &no_filters(), &fields);
        assert_eq!(hits, vec![0, 1, 2]);
    }

    #[test]
    fn test_search_and_filter_are_anded() {
        let records = staff();
        let fields = vec![SearchField::key("name")];
        let mut active = HashMap::new();
        active.insert("dept".to_string(), "Math".to_string());

        // Search "a" matches Amadou/Fatou, filter dept=Math matches Eve:
        // the intersection is empty.
        let hits = filter_indices(&records, "a", &active, &fields);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_filter_exact_not_substring() {
        let records = staff();
        let fields = vec![SearchField::key("name")];
        let mut active = HashMap::new();
        active.insert("dept".to_string(), "Inf".to_string());

        // "Inf" is a substring of "Info" but filters match exactly.
        let hits = filter_indices(&records, "", &active, &fields);
        assert!(hits.is_empty());

        active.insert("dept".to_string(), "info".to_string());
        let hits = filter_indices(&records, "", &active, &fields);
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn test_multiple_filters_all_must_match() {
        let records = staff();
        let fields = vec![SearchField::key("name")];
        let mut active = HashMap::new();
        active.insert("dept".to_string(), "Info".to_string());
        active.insert("exp".to_string(), "7".to_string());

        let hits = filter_indices(&records, "", &active, &fields);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_empty_filter_value_is_no_constraint() {
        let records = staff();
        let fields = vec![SearchField::key("name")];
        let mut active = HashMap::new();
        active.insert("dept".to_string(), String::new());

        let hits = filter_indices(&records, "", &active, &fields);
        assert_eq!(hits, vec![0, 1, 2]);
    }

    #[test]
    fn test_composite_search_field() {
        let records = vec![
            into_record(json!({"first": "Awa", "last": "Ba"})).unwrap(),
            into_record(json!({"first": "Omar", "last": "Sy"})).unwrap(),
        ];
        let fields = vec![SearchField::keys(["first", "last"])];

        // The needle spans the space between the concatenated parts.
        let hits = filter_indices(&records, "wa b", &no_filters(), &fields);
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn test_getter_search_field() {
        let records = staff();
        let fields = vec![SearchField::getter(|record| {
            json!(format!(
                "{} ({} yrs)",
                field_text(record, "name"),
                field_text(record, "exp")
            ))
        })];

        let hits = filter_indices(&records, "(7 yrs)", &no_filters(), &fields);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_missing_search_field_never_panics() {
        let records = staff();
        let fields = vec![SearchField::key("no_such_field")];
        let hits = filter_indices(&records, "a", &no_filters(), &fields);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = staff();
        let fields = vec![SearchField::key("name")];
        let mut active = HashMap::new();
        active.insert("dept".to_string(), "Info".to_string());

        let first = filter_indices(&records, "a", &active, &fields);
        let second = filter_indices(&records, "a", &active, &fields);
        assert_eq!(first, second);
    }

    #[test]
    fn test_dynamic_options_from_full_dataset() {
        let records = staff();
        let options = dynamic_options(&records, "dept");
        assert_eq!(options[0], FilterOption::all());
        let values: Vec<&str> = options[1..].iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Info", "Math"]);
    }

    #[test]
    fn test_dynamic_options_skip_missing_values() {
        let records = vec![
            into_record(json!({"dept": "Info"})).unwrap(),
            into_record(json!({"dept": null})).unwrap(),
            into_record(json!({})).unwrap(),
        ];
        let options = dynamic_options(&records, "dept");
        assert_eq!(options.len(), 2); // sentinel + "Info"
    }

    #[test]
    fn test_static_options_used_verbatim() {
        let config = FilterConfig::with_options(
            "status",
            "Status",
            vec![FilterOption::all(), FilterOption::new("Active", "active")],
        );
        let options = config.options_for(&staff());
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, "active");
    }

    #[test]
    fn test_filter_records_subset_of_dataset() {
        let records = staff();
        let fields = vec![SearchField::key("name")];
        let kept = filter_records(&records, "a", &no_filters(), &fields);
        assert_eq!(kept.len(), 2);
        for record in &kept {
            assert!(records.contains(record));
        }
        // The raw dataset is untouched.
        assert_eq!(records.len(), 3);
    }
}
