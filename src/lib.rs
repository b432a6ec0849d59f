/// DataGrid - Configuration-Driven Tabular Query Engine
///
/// A small in-memory query engine over JSON record sets: fetch a dataset
/// (static or one HTTP GET), filter it with free-text search and exact-match
/// field filters, sort it with stable null-last ordering, and slice it into
/// pages - all driven by declarative column/filter configuration instead of
/// bespoke per-table code.

pub mod column;
pub mod filter;
pub mod grid;
pub mod page;
pub mod record;
pub mod sort;
pub mod source;

pub use column::{Align, CellKind, ColumnDescriptor, ValueGetter};
pub use filter::{
    dynamic_options, filter_indices, filter_records, FilterConfig, FilterOption, FilterOptions,
    SearchField, ALL_VALUE,
};
pub use grid::{Cell, DataGrid, GridConfig, QueryState, DEFAULT_PAGE_SIZE};
pub use page::{page_slice, PageInfo};
pub use record::{display_text, field_text, Record};
pub use sort::{sort_indices, sort_records, SortDirection};
pub use source::{DataSource, LoadError, Transformer};
