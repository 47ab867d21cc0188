//! Call record sources
//!
//! `HttpCallSource` pulls the record array from the upstream calls API;
//! `FileCallSource` reads the same array from disk. Both decode elements one
//! at a time so a single unreadable element does not discard the batch.

use async_trait::async_trait;
use callboard_core::config::{AccessConfig, UpstreamConfig};
use callboard_core::models::CallRecord;
use callboard_core::traits::CallSource;
use callboard_core::{AppError, AppResult};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Query parameter carrying the phone identifier
const PHONE_ID_PARAM: &str = "userPhoneID";

/// Decode a JSON array of call records
///
/// Elements that are not objects are skipped and logged.
pub fn decode_records(body: &[u8]) -> AppResult<Vec<CallRecord>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::UpstreamPayload(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(AppError::UpstreamPayload(
            "expected a JSON array of calls".to_string(),
        ));
    };

    let total = items.len();
    let records: Vec<CallRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping unreadable call at index {}: {}", index, e);
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!("Decoded {} of {} calls", records.len(), total);
    }

    Ok(records)
}

/// Upstream calls API client
#[derive(Clone)]
pub struct HttpCallSource {
    http: reqwest::Client,
    url: String,
    token: String,
    phone_id: String,
}

impl HttpCallSource {
    pub fn new(upstream: &UpstreamConfig, access: &AccessConfig) -> AppResult<Self> {
        if upstream.url.trim().is_empty() {
            return Err(AppError::Config("upstream.url is not set".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(upstream.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: upstream.url.clone(),
            token: upstream.token.clone(),
            phone_id: access.user_phone_id.clone(),
        })
    }
}

#[async_trait]
impl CallSource for HttpCallSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_calls(&self) -> Result<Vec<CallRecord>, AppError> {
        debug!("Fetching calls for phone id {}", self.phone_id);

        let mut request = self
            .http
            .get(&self.url)
            .query(&[(PHONE_ID_PARAM, self.phone_id.as_str())]);
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let records = decode_records(&body)?;

        info!("Fetched {} calls from upstream", records.len());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("http({})", self.url)
    }
}

/// Reads the record array from a JSON file
#[derive(Debug, Clone)]
pub struct FileCallSource {
    path: PathBuf,
}

impl FileCallSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CallSource for FileCallSource {
    async fn fetch_calls(&self) -> Result<Vec<CallRecord>, AppError> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::Upstream(format!("Cannot read {}: {}", self.path.display(), e))
        })?;
        let records = decode_records(&body)?;

        info!("Loaded {} calls from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file({})", self.path.display())
    }
}
