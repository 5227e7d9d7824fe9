//! Fixed-size page arithmetic for the user list.
//!
//! Pages are 1-based. Nothing here clamps: a page past the end (or page 0)
//! simply yields an empty window.

use std::ops::Range;

pub const PAGE_SIZE: usize = 5;

/// Index range of `page` within a list of `len` items, cut to the list bounds.
pub fn page_window(len: usize, page: usize) -> Range<usize> {
    if page == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    let end = start.saturating_add(PAGE_SIZE);
    start.min(len)..end.min(len)
}

pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    &items[page_window(items.len(), page)]
}

/// Number of pages the pager offers for `len` items.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}
