/// DataGrid Column Configuration
///
/// A ColumnDescriptor describes how one visual column derives and displays
/// its value. Columns are configuration-as-data: plain descriptors
/// interpreted by the engine, with the cell presentation expressed as a
/// tagged `CellKind` enum rather than ad hoc property sniffing.
///
/// Value derivation follows a single precedence rule shared by search, sort,
/// and display: `value_getter` wins over `data_keys` concatenation, which
/// wins over the plain `data_key` lookup.

use crate::record::{display_text, field_text, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Derives a value from the whole record. Takes precedence over
/// `data_keys`/`data_key` when present.
pub type ValueGetter = Rc<dyn Fn(&Record) -> Value>;

/// Cell presentation kind. Selects which external renderer the presentation
/// layer invokes; value resolution is identical for all kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Plain text cell (default).
    #[default]
    Text,
    /// Avatar image derived from the cell value.
    Avatar,
    /// Colored badge/tag.
    Badge,
    /// Progress bar; the resolved value is read as a percentage.
    Progress,
    /// Caller-supplied renderer.
    Custom,
    /// Row action buttons; the resolved value is typically unused.
    Actions,
}

/// Horizontal cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Configuration for one grid column.
///
/// # Examples
///
/// ```
/// use datagrid::{Align, CellKind, ColumnDescriptor};
/// use serde_json::json;
///
/// let name = ColumnDescriptor::new("Name", "name");
/// let full = ColumnDescriptor::composite("Full name", ["first", "last"]);
/// let exp = ColumnDescriptor::new("Experience", "exp")
///     .with_align(Align::Right)
///     .with_kind(CellKind::Progress);
///
/// let record = json!({"first": "Awa", "last": "Ba", "exp": 7});
/// let record = record.as_object().unwrap();
/// assert_eq!(full.resolve_value(record), json!("Awa Ba"));
/// assert_eq!(exp.resolve_value(record), json!(7));
/// assert_eq!(name.resolve_text(record), "");
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Header label.
    pub title: String,
    /// Primary field key.
    pub data_key: String,
    /// Composite field keys; their concatenation produces the value.
    #[serde(default)]
    pub data_keys: Vec<String>,
    /// Separator placed between composite parts.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Derived-value closure; not part of the serializable configuration.
    #[serde(skip)]
    pub value_getter: Option<ValueGetter>,
    /// Display width hint, in pixels or grid units.
    #[serde(default)]
    pub width: Option<u32>,
    /// Cell alignment.
    #[serde(default)]
    pub align: Align,
    /// Whether the column participates in sorting.
    #[serde(default = "default_sortable")]
    pub sortable: bool,
    /// Presentation kind.
    #[serde(default)]
    pub kind: CellKind,
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_sortable() -> bool {
    true
}

impl ColumnDescriptor {
    /// Creates a plain column reading a single field.
    pub fn new(title: impl Into<String>, data_key: impl Into<String>) -> Self {
        ColumnDescriptor {
            title: title.into(),
            data_key: data_key.into(),
            data_keys: Vec::new(),
            separator: default_separator(),
            value_getter: None,
            width: None,
            align: Align::Left,
            sortable: true,
            kind: CellKind::Text,
        }
    }

    /// Creates a composite column whose value is the concatenation of
    /// several fields. The first key doubles as the column's `data_key` so
    /// sort lookups by any member key resolve to this column.
    pub fn composite<I, S>(title: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        let primary = keys.first().cloned().unwrap_or_default();
        let mut column = ColumnDescriptor::new(title, primary);
        column.data_keys = keys;
        column
    }

    /// Creates a computed column deriving its value from the whole record.
    pub fn computed<F>(title: impl Into<String>, data_key: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Record) -> Value + 'static,
    {
        let mut column = ColumnDescriptor::new(title, data_key);
        column.value_getter = Some(Rc::new(getter));
        column
    }

    /// Sets the separator used between composite parts.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the display width hint.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the cell alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Sets the presentation kind.
    pub fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    /// Excludes the column from sorting.
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Returns true if this column answers for the given sort key, either by
    /// `data_key` equality or membership in `data_keys`.
    pub fn matches_key(&self, key: &str) -> bool {
        self.data_key == key || self.data_keys.iter().any(|k| k == key)
    }

    /// Resolves the column's value for one record.
    ///
    /// Precedence: `value_getter`, then `data_keys` concatenation (missing
    /// and null parts coerce to empty strings), then the plain `data_key`
    /// lookup. A record with no such field resolves to `Value::Null`.
    pub fn resolve_value(&self, record: &Record) -> Value {
        if let Some(getter) = &self.value_getter {
            return getter(record);
        }
        if !self.data_keys.is_empty() {
            let joined = self
                .data_keys
                .iter()
                .map(|key| field_text(record, key))
                .collect::<Vec<_>>()
                .join(&self.separator);
            return Value::String(joined);
        }
        record.get(&self.data_key).cloned().unwrap_or(Value::Null)
    }

    /// Resolves the column's value as display text.
    pub fn resolve_text(&self, record: &Record) -> String {
        display_text(&self.resolve_value(record))
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("title", &self.title)
            .field("data_key", &self.data_key)
            .field("data_keys", &self.data_keys)
            .field("separator", &self.separator)
            .field("value_getter", &self.value_getter.as_ref().map(|_| "<fn>"))
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("kind", &self.kind)
            .finish()
    }
}
