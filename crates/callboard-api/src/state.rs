//! Shared application state
//!
//! `SnapshotStore` holds the record snapshot the views are derived from. A
//! snapshot is replaced only by a fetch, either because it aged past the TTL
//! or because a refresh was requested; until then every request sees the
//! same `Arc`, which is what keys the dashboard cache and resets paging.

use callboard_analytics::{DashboardCache, Snapshot};
use callboard_core::config::{AccessConfig, AnalyticsConfig, AppConfig};
use callboard_core::traits::CallSource;
use callboard_core::{AppError, AppResult};
use chrono::{Duration, Utc};
use chrono_tz::Tz;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Current snapshot plus the source it is fetched from
pub struct SnapshotStore {
    source: Arc<dyn CallSource>,
    ttl: Duration,
    current: RwLock<Option<Snapshot>>,
    // Serializes fetches so concurrent misses trigger a single upstream call
    fetch_lock: Mutex<()>,
}

impl SnapshotStore {
    pub fn new(source: Arc<dyn CallSource>, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            source,
            ttl,
            current: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    /// The held snapshot, fetching a new one if there is none or it is stale
    pub async fn current(&self) -> AppResult<Snapshot> {
        if let Some(snapshot) = self.fresh() {
            return Ok(snapshot);
        }

        let _guard = self.fetch_lock.lock().await;

        // Another request may have fetched while we waited
        if let Some(snapshot) = self.fresh() {
            return Ok(snapshot);
        }

        self.fetch().await
    }

    /// Fetch a new snapshot unconditionally
    pub async fn refresh(&self) -> AppResult<Snapshot> {
        let _guard = self.fetch_lock.lock().await;
        self.fetch().await
    }

    /// The held snapshot without fetching
    pub fn peek(&self) -> Option<Snapshot> {
        self.current.read().clone()
    }

    pub fn source(&self) -> &dyn CallSource {
        self.source.as_ref()
    }

    fn fresh(&self) -> Option<Snapshot> {
        self.current
            .read()
            .as_ref()
            .filter(|s| !s.is_stale(Utc::now(), self.ttl))
            .cloned()
    }

    async fn fetch(&self) -> AppResult<Snapshot> {
        debug!("Fetching calls from {}", self.source.describe());

        let records = match self.source.fetch_calls().await {
            Ok(records) => records,
            Err(e) => {
                if e.is_access_denied() {
                    warn!("Upstream denied access: {}", e);
                } else {
                    warn!("Upstream fetch failed, keeping previous snapshot: {}", e);
                }
                return Err(e);
            }
        };

        let snapshot = Snapshot::new(records);
        info!(
            "New snapshot {} with {} calls",
            snapshot.id(),
            snapshot.len()
        );

        *self.current.write() = Some(snapshot.clone());
        Ok(snapshot)
    }
}

/// State shared by all handlers
pub struct AppState {
    pub store: SnapshotStore,
    pub dashboard: DashboardCache,
    pub access: AccessConfig,
    pub analytics: AnalyticsConfig,
}

impl AppState {
    pub fn new(source: Arc<dyn CallSource>, config: &AppConfig) -> Self {
        Self::from_parts(source, config.access.clone(), config.analytics.clone())
    }

    pub fn from_parts(
        source: Arc<dyn CallSource>,
        access: AccessConfig,
        analytics: AnalyticsConfig,
    ) -> Self {
        Self {
            store: SnapshotStore::new(source, analytics.snapshot_ttl_secs),
            dashboard: DashboardCache::new(analytics.timezone),
            access,
            analytics,
        }
    }

    pub fn zone(&self) -> Tz {
        self.analytics.timezone
    }

    /// Reject the request unless the call views are enabled
    pub fn ensure_access(&self) -> AppResult<()> {
        if self.access.retell_enabled {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "call views are not enabled for this account".to_string(),
            ))
        }
    }
}
