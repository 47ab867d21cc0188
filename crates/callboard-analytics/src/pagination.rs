//! Pagination engine
//!
//! Pages are 1-based. A page outside `1..=total_pages` is not corrected: it
//! yields an empty slice, and its window is the one nearest to it.

use crate::constants::{DEFAULT_MAX_PAGE_BUTTONS, DEFAULT_PAGE_SIZE};
use crate::snapshot::Snapshot;
use serde::Serialize;
use uuid::Uuid;

/// Number of pages needed for `total_items`; 0 when empty
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Items shown on `page`
pub fn page_slice<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }

    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());

    &items[start..end]
}

/// Page numbers to expose as navigation controls
///
/// All pages when they fit in `max_buttons`; otherwise a window of exactly
/// `max_buttons` pages centred on `current` and pushed back inside
/// `1..=total_pages` at either edge.
pub fn page_window(total_pages: usize, current: usize, max_buttons: usize) -> Vec<usize> {
    if max_buttons == 0 || total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= max_buttons {
        return (1..=total_pages).collect();
    }

    // Past the last page the window is the tail window
    let current = current.min(total_pages);
    let half = max_buttons / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = start.saturating_add(max_buttons - 1).min(total_pages);

    // Clamped at the tail: pull the start back so the window stays full
    if end - start + 1 < max_buttons {
        start = end + 1 - max_buttons;
    }

    (start..=end).collect()
}

/// One page of a collection plus its navigation state
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub window: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<'a, T> Page<'a, T> {
    /// True when the requested page lies outside `1..=total_pages`
    pub fn is_out_of_range(&self) -> bool {
        self.page == 0 || self.page > self.total_pages
    }
}

/// Slice `items` for `page` and derive the page window
pub fn paginate<T>(items: &[T], page_size: usize, page: usize, max_buttons: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);

    Page {
        items: page_slice(items, page_size, page),
        page,
        page_size,
        total_items: items.len(),
        total_pages,
        window: page_window(total_pages, page, max_buttons),
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

/// Current-page state for a paginated view
///
/// The page resets to 1 whenever a different snapshot is observed and
/// otherwise moves only through `next`, `previous`, and `jump_to`. Every
/// move re-derives the window.
#[derive(Debug, Clone)]
pub struct PageNavigator {
    page_size: usize,
    max_buttons: usize,
    snapshot_id: Option<Uuid>,
    total_items: usize,
    page: usize,
    window: Vec<usize>,
}

impl Default for PageNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGE_BUTTONS)
    }
}

impl PageNavigator {
    pub fn new(page_size: usize, max_buttons: usize) -> Self {
        Self {
            page_size,
            max_buttons,
            snapshot_id: None,
            total_items: 0,
            page: 1,
            window: Vec::new(),
        }
    }

    /// Track `snapshot`, resetting to page 1 if it is not the one already tracked
    pub fn observe(&mut self, snapshot: &Snapshot) {
        if self.snapshot_id != Some(snapshot.id()) {
            self.snapshot_id = Some(snapshot.id());
            self.reset(snapshot.len());
        }
    }

    /// Back to page 1 for a collection of `total_items`
    pub fn reset(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.page = 1;
        self.refresh_window();
    }

    /// Advance one page; no-op on the last page
    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
            self.refresh_window();
        }
    }

    /// Go back one page; no-op on page 1
    pub fn previous(&mut self) {
        if self.has_previous() {
            self.page -= 1;
            self.refresh_window();
        }
    }

    /// Move to `page` as given, without clamping
    pub fn jump_to(&mut self, page: usize) {
        self.page = page;
        self.refresh_window();
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    pub fn window(&self) -> &[usize] {
        &self.window
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Items on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page_slice(items, self.page_size, self.page)
    }

    fn refresh_window(&mut self) {
        self.window = page_window(self.total_pages(), self.page, self.max_buttons);
    }
}
