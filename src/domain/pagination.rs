//! Pagination arithmetic for the grid footer.

use crate::state::PageSize;

/// Footer navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageNav {
    First,
    Prev,
    Next,
    Last,
    /// Jump to an explicit page; clamped like the others.
    To(u32),
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total_rows: usize, page_size: PageSize) -> u32 {
    let pages = total_rows.div_ceil(page_size.get() as usize).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamps a page into `[1, total_pages]`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Page a navigation control leads to. Never out of range.
pub fn target_page(nav: PageNav, current: u32, total_pages: u32) -> u32 {
    let wanted = match nav {
        PageNav::First => 1,
        PageNav::Prev => current.saturating_sub(1),
        PageNav::Next => current.saturating_add(1),
        PageNav::Last => total_pages,
        PageNav::To(page) => page,
    };
    clamp_page(wanted, total_pages)
}

/// Totals label: `Total: N`, or `Total: N of M` when a distinct overall total
/// is known.
pub fn totals_label(total_rows: usize, total_general: Option<usize>) -> String {
    match total_general {
        Some(general) if general != total_rows => format!("Total: {} of {}", total_rows, general),
        _ => format!("Total: {}", total_rows),
    }
}

/// 1-based inclusive range of rows shown on `page`, or `None` when empty.
pub fn row_range(page: u32, page_size: PageSize, total_rows: usize) -> Option<(usize, usize)> {
    if total_rows == 0 {
        return None;
    }
    let size = page_size.get() as usize;
    let start = (page.max(1) as usize - 1) * size + 1;
    if start > total_rows {
        return None;
    }
    Some((start, (start + size - 1).min(total_rows)))
}

/// `Showing a-b`, or `Showing 0` for an empty page.
pub fn range_label(page: u32, page_size: PageSize, total_rows: usize) -> String {
    match row_range(page, page_size, total_rows) {
        Some((start, end)) => format!("Showing {}-{}", start, end),
        None => "Showing 0".to_string(),
    }
}
