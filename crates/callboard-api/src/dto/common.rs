//! Common DTOs used across the API

use callboard_analytics::{Page, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    /// Create a success response with data and message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    /// Page number (1-indexed); pages past the end are allowed and come back empty
    #[serde(default = "default_page", deserialize_with = "deserialize_number_from_string")]
    #[validate(range(min = 1))]
    pub page: i64,

    /// Items per page; the configured page size when omitted
    #[serde(default, deserialize_with = "deserialize_optional_number_from_string")]
    #[validate(range(min = 1, max = 1000))]
    pub per_page: Option<i64>,
}

/// Deserialize a number from either a string or a number
fn deserialize_number_from_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct I64OrStringVisitor;

    impl<'de> Visitor<'de> for I64OrStringVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(de::Error::custom)
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            value.trim().parse::<i64>().map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(I64OrStringVisitor)
}

fn deserialize_optional_number_from_string<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_number_from_string(deserializer).map(Some)
}

fn default_page() -> i64 {
    1
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: None,
        }
    }
}

impl PaginationParams {
    /// Requested page as an index for the pagination engine
    #[inline]
    pub fn page(&self) -> usize {
        usize::try_from(self.page).unwrap_or(0)
    }

    /// Requested page size, or `fallback` when none was given
    #[inline]
    pub fn per_page_or(&self, fallback: usize) -> usize {
        self.per_page
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(fallback)
    }
}

/// Navigation metadata for one page of calls
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// Page numbers to render as buttons
    pub window: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> From<&Page<'_, T>> for PageMeta {
    fn from(page: &Page<'_, T>) -> Self {
        Self {
            page: page.page,
            per_page: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
            window: page.window.clone(),
            has_previous: page.has_previous,
            has_next: page.has_next,
        }
    }
}

/// Identity of the snapshot a response was derived from
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMeta {
    pub id: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub records: usize,
}

impl From<&Snapshot> for SnapshotMeta {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.id(),
            fetched_at: snapshot.fetch_time(),
            records: snapshot.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callboard_analytics::paginate;

    #[test]
    fn test_pagination_params_from_query_strings() {
        let params: PaginationParams = serde_json::from_value(serde_json::json!({
            "page": "3",
            "per_page": "20"
        }))
        .unwrap();
        assert_eq!(params.page(), 3);
        assert_eq!(params.per_page_or(50), 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_pagination_params_defaults() {
        let params: PaginationParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page_or(50), 50);
    }

    #[test]
    fn test_pagination_params_validation() {
        let params = PaginationParams {
            page: 0,
            per_page: None,
        };
        assert!(params.validate().is_err());

        let params = PaginationParams {
            page: 1,
            per_page: Some(5000),
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_page_meta_from_page() {
        let items: Vec<u32> = (0..125).collect();
        let meta = PageMeta::from(&paginate(&items, 50, 2, 10));

        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.window, vec![1, 2, 3]);
        assert!(meta.has_previous);
        assert!(meta.has_next);
    }

    #[test]
    fn test_api_response() {
        let resp = ApiResponse::success("test");
        assert_eq!(resp.data, "test");
        assert!(resp.message.is_none());

        let resp = ApiResponse::with_message("data", "refreshed");
        assert_eq!(resp.message, Some("refreshed".to_string()));
    }
}
