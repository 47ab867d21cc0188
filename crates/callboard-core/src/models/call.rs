//! Call record model
//!
//! One voice-agent call as delivered by the upstream calls API. Records are
//! read-only once received.

use super::category::{Badge, CallOutcome, CallStatus, Sentiment};
use super::lenient;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Nested cost breakdown reported by the voice platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallCost {
    /// Combined platform cost
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub combined_cost: Option<Decimal>,

    /// Price per unit of duration
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_duration_unit_price: Option<Decimal>,
}

/// Call record
///
/// Numeric fields are optional because upstream data is not validated; a
/// missing or non-numeric value is excluded from whichever metric needs it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Opaque unique identifier
    #[serde(default, deserialize_with = "lenient::string")]
    pub call_id: String,

    /// Call type (web_call, phone_call, ...), display only
    #[serde(default, deserialize_with = "lenient::string")]
    pub call_type: String,

    /// Call direction, display only
    #[serde(default, deserialize_with = "lenient::string")]
    pub direction: String,

    /// Caller number
    #[serde(default, deserialize_with = "lenient::string")]
    pub from_number: String,

    /// Called number
    #[serde(default, deserialize_with = "lenient::string")]
    pub to_number: String,

    /// Free-form live status
    #[serde(default, deserialize_with = "lenient::string")]
    pub call_status: String,

    /// Why the call ended
    #[serde(default, deserialize_with = "lenient::string")]
    pub disconnection_reason: String,

    /// Start instant in milliseconds since epoch
    #[serde(default, deserialize_with = "lenient::integer")]
    pub start_timestamp: Option<i64>,

    /// End instant in milliseconds since epoch
    #[serde(default, deserialize_with = "lenient::integer")]
    pub end_timestamp: Option<i64>,

    /// Duration in milliseconds
    #[serde(default, deserialize_with = "lenient::integer")]
    pub duration_ms: Option<i64>,

    /// Average end-to-end latency in milliseconds
    #[serde(default, deserialize_with = "lenient::integer")]
    pub average_end_to_end_latency: Option<i64>,

    /// Platform cost
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_cost: Option<Decimal>,

    /// Cost billed to the customer including margin
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub cost_with_profit: Option<Decimal>,

    /// Cost shown in the history table
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub real_cost: Option<Decimal>,

    /// Nested cost breakdown
    #[serde(default, deserialize_with = "lenient::object")]
    pub call_cost: Option<CallCost>,

    /// "Positive", "Neutral", "Negative", or anything else
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub user_sentiment: Option<String>,

    /// Whether the agent achieved the goal of the call
    #[serde(default, deserialize_with = "lenient::flag")]
    pub call_successful: bool,

    /// Voicemail detected
    #[serde(default, deserialize_with = "lenient::flag")]
    pub in_voicemail: bool,

    /// Booking completed during the call
    #[serde(default, deserialize_with = "lenient::flag")]
    pub reserva_finalizada: bool,

    /// Full transcript
    #[serde(default, deserialize_with = "lenient::string")]
    pub transcript: String,

    /// Recording link
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub recording_url: Option<String>,

    /// Public log link
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub public_log_url: Option<String>,
}

impl CallRecord {
    /// Start instant, if the timestamp is present and representable
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start_timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// End instant, if the timestamp is present and representable
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.end_timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// Duration in milliseconds, if present and non-negative
    #[inline]
    pub fn valid_duration_ms(&self) -> Option<i64> {
        self.duration_ms.filter(|ms| *ms >= 0)
    }

    /// Combined cost, with an absent breakdown counting as zero
    pub fn combined_cost_or_zero(&self) -> Decimal {
        self.call_cost
            .as_ref()
            .and_then(|c| c.combined_cost)
            .unwrap_or(Decimal::ZERO)
    }

    /// Unit price from the cost breakdown
    pub fn unit_price(&self) -> Option<Decimal> {
        self.call_cost
            .as_ref()
            .and_then(|c| c.total_duration_unit_price)
    }

    /// Recognized sentiment, `None` when absent or outside the closed set
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.user_sentiment.as_deref().and_then(Sentiment::parse)
    }

    /// Recognized live status
    pub fn status(&self) -> Option<CallStatus> {
        CallStatus::parse(&self.call_status)
    }

    #[inline]
    pub fn outcome(&self) -> CallOutcome {
        CallOutcome::from_flag(self.call_successful)
    }

    pub fn sentiment_badge(&self) -> Badge {
        self.sentiment()
            .map_or(Sentiment::UNKNOWN_BADGE, |s| s.badge())
    }

    pub fn status_badge(&self) -> Badge {
        self.status().map_or(CallStatus::UNKNOWN_BADGE, |s| s.badge())
    }
}
