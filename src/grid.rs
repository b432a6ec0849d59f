/// DataGrid Engine
///
/// `DataGrid` is the stateful facade over the pipeline: data source adapter
/// produces the raw dataset, the predicate engine filters it, the ordering
/// engine sorts the filtered result, and the pager slices the sorted result
/// into the current page. Any change to search text, a filter, the sort, or
/// the page size re-runs the downstream stages; replacing the dataset
/// re-runs everything.
///
/// Each grid owns its dataset and `QueryState` exclusively; two grids on one
/// screen never share state.

use crate::column::{Align, CellKind, ColumnDescriptor};
use crate::filter::{filter_indices, FilterConfig, FilterOption, SearchField};
use crate::page::{page_slice, PageInfo};
use crate::record::Record;
use crate::sort::{sort_indices, SortDirection};
use crate::source::{DataSource, LoadError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Page size used when the configuration does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The mutable query parameters driving one grid instance.
///
/// Mutated exclusively through the grid's setters. Search, filter, and
/// page-size changes reset the page to 1; page and sort changes do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Free-text search string; empty means no constraint.
    pub search: String,
    /// Active exact-match filters, field to selected value.
    pub filters: HashMap<String, String>,
    /// Current sort key; empty means unsorted.
    pub sort_key: String,
    /// Current sort direction; `None` means unsorted.
    pub sort_direction: Option<SortDirection>,
    /// Current 1-based page.
    pub page: usize,
    /// Records per page.
    pub page_size: usize,
}

impl QueryState {
    /// Default state: empty search, no filters, no sort, page 1.
    pub fn new(page_size: usize) -> Self {
        QueryState {
            search: String::new(),
            filters: HashMap::new(),
            sort_key: String::new(),
            sort_direction: None,
            page: 1,
            page_size,
        }
    }
}

/// Declarative grid configuration: columns, search fields, filters, paging.
pub struct GridConfig {
    pub columns: Vec<ColumnDescriptor>,
    pub search_fields: Vec<SearchField>,
    pub filters: Vec<FilterConfig>,
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl GridConfig {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        GridConfig {
            columns,
            search_fields: Vec::new(),
            filters: Vec::new(),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 20, 50],
        }
    }

    pub fn with_search_fields(mut self, fields: Vec<SearchField>) -> Self {
        self.search_fields = fields;
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterConfig>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }
}

/// One resolved cell handed to the presentation layer: the derived value
/// plus the hints selecting and placing the external renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: Value,
    pub kind: CellKind,
    pub align: Align,
}

type DataLoadedCallback = Box<dyn Fn(&[Record])>;
type ErrorCallback = Box<dyn Fn(&LoadError)>;

/// A configuration-driven tabular query engine instance.
///
/// # Examples
///
/// ```
/// use datagrid::{ColumnDescriptor, DataGrid, DataSource, GridConfig, SearchField};
/// use serde_json::json;
///
/// let records = vec![
///     json!({"name": "Amadou", "dept": "Info", "exp": 3}),
///     json!({"name": "Fatou", "dept": "Info", "exp": 7}),
///     json!({"name": "Eve", "dept": "Math", "exp": 1}),
/// ]
/// .into_iter()
/// .map(|v| v.as_object().unwrap().clone())
/// .collect();
///
/// let config = GridConfig::new(vec![
///     ColumnDescriptor::new("Name", "name"),
///     ColumnDescriptor::new("Department", "dept"),
/// ])
/// .with_search_fields(vec![SearchField::key("name")]);
///
/// let mut grid = DataGrid::new(config, DataSource::from_records(records));
/// grid.set_search("a");
/// assert_eq!(grid.total_filtered(), 2); // Amadou and Fatou
/// ```
pub struct DataGrid {
    config: GridConfig,
    source: DataSource,
    records: Vec<Record>,
    state: QueryState,
    loading: bool,
    error: Option<LoadError>,
    on_data_loaded: Option<DataLoadedCallback>,
    on_error: Option<ErrorCallback>,
}

impl DataGrid {
    /// Creates a grid over the given source.
    ///
    /// A static source populates the dataset immediately and the grid is
    /// never loading. A remote source starts empty; call [`DataGrid::load`]
    /// to fetch.
    pub fn new(config: GridConfig, source: DataSource) -> Self {
        let state = QueryState::new(config.default_page_size);
        let records = match &source {
            DataSource::Static(records) => records.clone(),
            DataSource::Remote { .. } => Vec::new(),
        };
        DataGrid {
            config,
            source,
            records,
            state,
            loading: false,
            error: None,
            on_data_loaded: None,
            on_error: None,
        }
    }

    /// Registers a callback invoked with the new dataset after every
    /// successful load.
    pub fn on_data_loaded<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[Record]) + 'static,
    {
        self.on_data_loaded = Some(Box::new(callback));
        self
    }

    /// Registers a callback invoked with the error after every failed load.
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&LoadError) + 'static,
    {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Loads (or re-loads) the dataset from the source.
    ///
    /// On success the new dataset fully replaces the old one, any previous
    /// error is cleared, and the data-loaded callback fires with the record
    /// count available. On failure the previous dataset stays in place, the
    /// error is retained for display, and the error callback fires. Each
    /// completed load wins over whatever was in place when it resolves.
    pub fn load(&mut self) -> Result<usize, LoadError> {
        self.loading = true;
        let result = self.source.load();
        self.loading = false;

        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.error = None;
                if let Some(callback) = &self.on_data_loaded {
                    callback(&self.records);
                }
                Ok(count)
            }
            Err(error) => {
                self.error = Some(error.clone());
                if let Some(callback) = &self.on_error {
                    callback(&error);
                }
                Err(error)
            }
        }
    }

    /// Replaces the data source and resets the query state to its defaults.
    ///
    /// Static sources take effect immediately; remote sources clear the
    /// dataset until the next [`DataGrid::load`].
    pub fn set_source(&mut self, source: DataSource) {
        self.state = QueryState::new(self.config.default_page_size);
        self.error = None;
        self.records = match &source {
            DataSource::Static(records) => records.clone(),
            DataSource::Remote { .. } => Vec::new(),
        };
        self.source = source;
    }

    /// Sets the free-text search and resets to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.search = search.into();
        self.state.page = 1;
    }

    /// Selects a filter value and resets to page 1. An empty value (the
    /// "all" sentinel) clears the constraint for that field.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.state.filters.remove(&field);
        } else {
            self.state.filters.insert(field, value);
        }
        self.state.page = 1;
    }

    /// Clears every active filter and resets to page 1.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.page = 1;
    }

    /// Sets the sort key and direction. The page is not reset.
    pub fn set_sort(&mut self, key: impl Into<String>, direction: SortDirection) {
        self.state.sort_key = key.into();
        self.state.sort_direction = Some(direction);
    }

    /// Removes the sort; records revert to dataset order.
    pub fn clear_sort(&mut self) {
        self.state.sort_key.clear();
        self.state.sort_direction = None;
    }

    /// Navigates to a page. Nothing else changes; an out-of-range page
    /// renders empty rather than failing.
    pub fn set_page(&mut self, page: usize) {
        self.state.page = page.max(1);
    }

    /// Changes the page size and resets to page 1 so the grid never lands on
    /// a page past the shrunken page count.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.state.page_size = page_size;
        self.state.page = 1;
    }

    /// The raw dataset as last loaded.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The current query parameters.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// The column configuration.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.config.columns
    }

    /// The filter configuration.
    pub fn filters(&self) -> &[FilterConfig] {
        &self.config.filters
    }

    /// Page sizes offered by the configuration.
    pub fn page_size_options(&self) -> &[usize] {
        &self.config.page_size_options
    }

    /// True while a load is in flight.
    ///
    /// [`DataGrid::load`] blocks, so a caller driving the grid from one
    /// thread only ever observes `false`; the flag is meaningful when the
    /// load runs on a worker and the UI thread polls for a spinner.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The error from the last failed load, until a load succeeds.
    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// Indices of the filtered, sorted records (pre-page).
    fn visible_indices(&self) -> Vec<usize> {
        let filtered = filter_indices(
            &self.records,
            &self.state.search,
            &self.state.filters,
            &self.config.search_fields,
        );
        sort_indices(
            &self.records,
            &self.config.columns,
            &self.state.sort_key,
            self.state.sort_direction,
            filtered,
        )
    }

    /// Record count after filtering, before paging.
    pub fn total_filtered(&self) -> usize {
        filter_indices(
            &self.records,
            &self.state.search,
            &self.state.filters,
            &self.config.search_fields,
        )
        .len()
    }

    /// Navigation state for the current page.
    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.total_filtered(), self.state.page, self.state.page_size)
    }

    /// The records on the current page, in display order.
    pub fn page_records(&self) -> Vec<&Record> {
        let visible = self.visible_indices();
        page_slice(&visible, self.state.page, self.state.page_size)
            .iter()
            .map(|&index| &self.records[index])
            .collect()
    }

    /// Resolves one record against every configured column, producing the
    /// cells the presentation layer renders.
    pub fn row_cells(&self, record: &Record) -> Vec<Cell> {
        self.config
            .columns
            .iter()
            .map(|column| Cell {
                value: column.resolve_value(record),
                kind: column.kind,
                align: column.align,
            })
            .collect()
    }

    /// Option list for one configured filter.
    ///
    /// Dynamic filters derive from the full raw dataset, never the filtered
    /// subset, so the option list never shrinks as the user narrows the
    /// view. Unknown fields yield an empty list.
    pub fn filter_options(&self, field: &str) -> Vec<FilterOption> {
        self.config
            .filters
            .iter()
            .find(|filter| filter.field == field)
            .map(|filter| filter.options_for(&self.records))
            .unwrap_or_default()
    }
}

impl fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("source", &self.source)
            .field("records", &self.records.len())
            .field("state", &self.state)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}
