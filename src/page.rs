/// DataGrid Pager
///
/// Slices the ordered, filtered record set into 1-based pages and exposes
/// the navigation state the presentation layer renders ("showing X-Y of Z",
/// page count). Out-of-range pages yield an empty slice, never an error.

use serde::{Deserialize, Serialize};

/// Returns the 1-based page as a contiguous slice, clipped to the array
/// bounds. A page past the end yields an empty slice; a page size of zero
/// always yields an empty slice.
///
/// # Examples
///
/// ```
/// use datagrid::page::page_slice;
///
/// let items = [1, 2, 3];
/// assert_eq!(page_slice(&items, 1, 2), &[1, 2]);
/// assert_eq!(page_slice(&items, 2, 2), &[3]);
/// assert!(page_slice(&items, 3, 2).is_empty());
/// ```
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Navigation state for one rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Record count after filtering, before paging.
    pub total: usize,
    /// Current 1-based page.
    pub page: usize,
    /// Records per page.
    pub page_size: usize,
}

impl PageInfo {
    pub fn new(total: usize, page: usize, page_size: usize) -> Self {
        PageInfo {
            total,
            page,
            page_size,
        }
    }

    /// Number of pages needed for the filtered set. An empty set still
    /// renders one (empty) page.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 || self.total == 0 {
            return 1;
        }
        (self.total + self.page_size - 1) / self.page_size
    }

    /// 1-based index of the first record on the current page, or 0 when the
    /// page is empty.
    pub fn start(&self) -> usize {
        let offset = self.page.saturating_sub(1).saturating_mul(self.page_size);
        if offset >= self.total {
            0
        } else {
            offset + 1
        }
    }

    /// 1-based index of the last record on the current page, or 0 when the
    /// page is empty.
    pub fn end(&self) -> usize {
        let offset = self.page.saturating_sub(1).saturating_mul(self.page_size);
        if offset >= self.total {
            0
        } else {
            (offset + self.page_size).min(self.total)
        }
    }

    /// True when the current page is past the last record.
    pub fn out_of_range(&self) -> bool {
        self.total > 0 && self.start() == 0
    }
}
