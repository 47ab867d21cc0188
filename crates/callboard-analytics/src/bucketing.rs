//! Time bucketing
//!
//! Maps instants to calendar month and day keys in a given time zone.
//! Timestamps that cannot be represented yield `None`; callers exclude the
//! record from time-bucketed metrics and count it.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Calendar month, ordered chronologically and rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build from a year and a 1-based month
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Month of an instant in `zone`
pub fn month_of<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z) -> MonthKey {
    let local = instant.with_timezone(zone);
    MonthKey {
        year: local.year(),
        month: local.month(),
    }
}

/// Month key for a millisecond timestamp
pub fn month_key<Z: TimeZone>(timestamp_ms: i64, zone: &Z) -> Option<MonthKey> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|instant| month_of(instant, zone))
}

/// Day key for a millisecond timestamp
pub fn day_key<Z: TimeZone>(timestamp_ms: i64, zone: &Z) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|instant| instant.with_timezone(zone).date_naive())
}
