//! Common traits for record sources
//!
//! The analytics core never fetches anything itself; it is handed a
//! snapshot produced by a `CallSource`.

use crate::error::AppError;
use crate::models::CallRecord;
use async_trait::async_trait;

/// Upstream supplier of call records
///
/// One call yields the whole collection as a single in-memory batch.
#[async_trait]
pub trait CallSource: Send + Sync {
    /// Fetch the full record collection for the configured phone identifier
    async fn fetch_calls(&self) -> Result<Vec<CallRecord>, AppError>;

    /// Short description used in logs
    fn describe(&self) -> String;
}

/// Source backed by a fixed, in-memory collection
#[derive(Debug, Clone, Default)]
pub struct StaticCallSource {
    records: Vec<CallRecord>,
}

impl StaticCallSource {
    pub fn new(records: Vec<CallRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CallSource for StaticCallSource {
    async fn fetch_calls(&self) -> Result<Vec<CallRecord>, AppError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static({} records)", self.records.len())
    }
}
