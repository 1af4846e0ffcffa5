//! Pagination mathematics shared by the store, the HTTP surface, and the
//! client facades.
//!
//! A paged listing always reports `total` (the filtered count before
//! slicing) and `total_pages = ceil(total / page_size)`. A `page` past the
//! end is NOT clamped: it yields an empty `items` slice while `total` and
//! `total_pages` stay truthful, and the presentation layer is expected to
//! show the empty page.

/* --------------------------------------------------------------------------
   Limits
   -------------------------------------------------------------------------- */

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/* --------------------------------------------------------------------------
   Pagination
   -------------------------------------------------------------------------- */

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Build a request, normalizing only the lower bounds: `page` is raised
    /// to 1 and `page_size` is clamped to `1..=MAX_PAGE_SIZE`. The upper
    /// page bound is deliberately left alone (no clamping past the end).
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of pages needed to hold `total` items. Zero when the filtered
    /// set is empty.
    pub fn total_pages(&self, total: usize) -> u32 {
        total.div_ceil(self.page_size as usize) as u32
    }

    /// The `[start, end)` window into a filtered collection of `total`
    /// items. Collapses to an empty window once `page` runs past the end.
    pub fn slice_bounds(&self, total: usize) -> (usize, usize) {
        let start = ((self.page - 1) as usize)
            .saturating_mul(self.page_size as usize)
            .min(total);
        let end = start.saturating_add(self.page_size as usize).min(total);
        (start, end)
    }
}

/* --------------------------------------------------------------------------
   Page
   -------------------------------------------------------------------------- */

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Slice an already-filtered collection down to the requested window.
    pub fn from_filtered(filtered: Vec<T>, pagination: Pagination) -> Self {
        let total = filtered.len();
        let total_pages = pagination.total_pages(total);
        let (start, end) = pagination.slice_bounds(total);

        let items = filtered
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect();

        Self {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages,
        }
    }

    /// Convert the item type while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
