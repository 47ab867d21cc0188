//! Call analytics engine for Callboard
//!
//! Pure, synchronous derivations over an immutable snapshot of call records:
//!
//! - `bucketing` - calendar month and day keys in a configured time zone
//! - `aggregation` - dashboard summary, series, and distributions
//! - `pagination` - page slices, page-number windows, and the page navigator
//! - `snapshot` - the shared record snapshot and the memoized dashboard stage
//!
//! Nothing here performs I/O or holds state shared between callers except the
//! explicit `DashboardCache`.

pub mod aggregation;
pub mod bucketing;
pub mod pagination;
pub mod snapshot;

pub use aggregation::{aggregate, DashboardSummary, DataQuality};
pub use bucketing::{day_key, month_key, month_of, MonthKey};
pub use pagination::{page_slice, page_window, paginate, total_pages, Page, PageNavigator};
pub use snapshot::{DashboardCache, Snapshot};

/// Presentation defaults
pub mod constants {
    /// Rows per history page
    pub const DEFAULT_PAGE_SIZE: usize = 50;

    /// Page-number buttons shown at once
    pub const DEFAULT_MAX_PAGE_BUTTONS: usize = 10;

    /// Entries of the per-call cost chart
    pub const DEFAULT_COST_SAMPLE_DISPLAY: usize = 20;
}
