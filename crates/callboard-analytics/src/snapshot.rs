//! Record snapshots and the memoized dashboard stage
//!
//! A `Snapshot` is the immutable record collection held for one view
//! activation. Clones share the same allocation, so identity is the `Arc`
//! pointer. `DashboardCache` recomputes the summary only when it is asked
//! about a different snapshot or the calendar month of `now` changes.

use crate::aggregation::{aggregate, DashboardSummary};
use crate::bucketing::{month_of, MonthKey};
use callboard_core::models::CallRecord;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Immutable, cheaply clonable record collection
#[derive(Debug, Clone)]
pub struct Snapshot {
    id: Uuid,
    fetched_at: DateTime<Utc>,
    records: Arc<[CallRecord]>,
}

impl Snapshot {
    pub fn new(records: Vec<CallRecord>) -> Self {
        Self::with_fetch_time(records, Utc::now())
    }

    pub fn with_fetch_time(records: Vec<CallRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            fetched_at,
            records: records.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn fetch_time(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `other` shares this snapshot's allocation
    pub fn same_as(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// True once the snapshot is older than `ttl` at `now`
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.fetched_at >= ttl
    }

    /// Record with the given `call_id`
    pub fn find(&self, call_id: &str) -> Option<&CallRecord> {
        self.records.iter().find(|r| r.call_id == call_id)
    }
}

struct CacheEntry {
    records: Arc<[CallRecord]>,
    month: MonthKey,
    summary: Arc<DashboardSummary>,
}

/// Single-entry memo of the dashboard summary
pub struct DashboardCache {
    zone: Tz,
    entry: Mutex<Option<CacheEntry>>,
}

impl DashboardCache {
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            entry: Mutex::new(None),
        }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Summary of `snapshot` relative to `now`, computed at most once per
    /// snapshot and month
    pub fn summary(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Arc<DashboardSummary> {
        let month = month_of(now, &self.zone);
        let mut entry = self.entry.lock();

        if let Some(cached) = entry.as_ref() {
            if Arc::ptr_eq(&cached.records, &snapshot.records) && cached.month == month {
                debug!("Dashboard cache HIT for snapshot {}", snapshot.id);
                return Arc::clone(&cached.summary);
            }
        }

        debug!("Dashboard cache MISS for snapshot {}", snapshot.id);
        let summary = Arc::new(aggregate(snapshot.records(), now, &self.zone));

        *entry = Some(CacheEntry {
            records: Arc::clone(&snapshot.records),
            month,
            summary: Arc::clone(&summary),
        });

        summary
    }

    /// Drop the memoized summary
    pub fn invalidate(&self) {
        *self.entry.lock() = None;
    }
}
