//! Client-side pagination over an ordered result set.
//!
//! `total_pages = max(1, ceil(count / page_size))`. Requested page numbers
//! are 1-based and clamped to `[1, total_pages]`, so an empty set still has
//! one (empty) page.

/// Page size used by the result grid.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// One page of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// 1-based page number after clamping.
    pub number: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Items on this page.
    pub items: &'a [T],
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Number of pages needed for `count` items. A zero page size counts as 1.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested 1-based page number to `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slice page `page` (1-based, clamped) out of `items`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let number = clamp_page(page, total);
    let start = ((number - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    Page {
        number,
        total_pages: total,
        items: &items[start..end],
    }
}
