//! Call history DTOs

use super::common::{PageMeta, SnapshotMeta};
use super::format;
use callboard_core::models::{Badge, CallRecord};
use chrono_tz::Tz;
use serde::Serialize;

/// One row of the call history table
#[derive(Debug, Clone, Serialize)]
pub struct CallRow {
    pub call_id: String,
    pub started_at: String,
    pub duration: String,
    pub call_type: String,
    pub real_cost: String,
    pub cost_with_profit: String,
    pub disconnection_reason: String,
    pub call_status: String,
    pub status_badge: Badge,
    /// Raw upstream value; empty when absent
    pub user_sentiment: String,
    pub sentiment_badge: Badge,
    pub from_number: String,
    pub to_number: String,
    pub call_successful: &'static str,
    pub in_voicemail: &'static str,
    pub average_latency: String,
    pub reserva_finalizada: &'static str,
}

impl CallRow {
    pub fn new(call: &CallRecord, zone: &Tz) -> Self {
        Self {
            call_id: call.call_id.clone(),
            started_at: format::datetime(call.started_at(), zone),
            duration: format::duration(call.duration_ms),
            call_type: call.call_type.clone(),
            real_cost: format::money(call.real_cost),
            cost_with_profit: format::money(call.cost_with_profit),
            disconnection_reason: call.disconnection_reason.clone(),
            call_status: call.call_status.clone(),
            status_badge: call.status_badge(),
            user_sentiment: call.user_sentiment.clone().unwrap_or_default(),
            sentiment_badge: call.sentiment_badge(),
            from_number: call.from_number.clone(),
            to_number: call.to_number.clone(),
            call_successful: format::yes_no(call.call_successful),
            in_voicemail: format::yes_no(call.in_voicemail),
            average_latency: format::latency(call.average_end_to_end_latency),
            reserva_finalizada: format::yes_no(call.reserva_finalizada),
        }
    }
}

/// One page of the call history
#[derive(Debug, Clone, Serialize)]
pub struct CallListResponse {
    pub data: Vec<CallRow>,
    pub pagination: PageMeta,
    pub snapshot: SnapshotMeta,
}

/// Detail card for a single call
#[derive(Debug, Clone, Serialize)]
pub struct CallCard {
    pub call_id: String,
    /// "Exitosa" or "Fallida"
    pub outcome: &'static str,
    pub outcome_badge: Badge,

    pub from_number: String,
    pub to_number: String,
    pub direction: String,
    pub call_type: String,
    pub call_status: String,
    pub status_badge: Badge,
    pub disconnection_reason: String,

    pub started_at: String,
    pub ended_at: String,
    pub duration: String,
    pub average_latency: String,

    pub real_cost: String,
    pub unit_price: String,
    pub cost_with_profit: String,

    pub user_sentiment: String,
    pub sentiment_badge: Badge,
    pub call_successful: &'static str,
    pub in_voicemail: &'static str,
    pub reserva_finalizada: &'static str,

    pub transcript: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_log_url: Option<String>,
}

impl CallCard {
    pub fn new(call: &CallRecord, zone: &Tz) -> Self {
        let outcome = call.outcome();

        Self {
            call_id: call.call_id.clone(),
            outcome: outcome.label(),
            outcome_badge: outcome.badge(),
            from_number: call.from_number.clone(),
            to_number: call.to_number.clone(),
            direction: call.direction.clone(),
            call_type: call.call_type.clone(),
            call_status: call.call_status.clone(),
            status_badge: call.status_badge(),
            disconnection_reason: call.disconnection_reason.clone(),
            started_at: format::datetime(call.started_at(), zone),
            ended_at: format::datetime(call.ended_at(), zone),
            duration: format::duration(call.duration_ms),
            average_latency: format::latency(call.average_end_to_end_latency),
            real_cost: format::money(call.real_cost),
            unit_price: format::unit_price(call.unit_price()),
            cost_with_profit: format::money(call.cost_with_profit),
            user_sentiment: call.user_sentiment.clone().unwrap_or_default(),
            sentiment_badge: call.sentiment_badge(),
            call_successful: format::yes_no(call.call_successful),
            in_voicemail: format::yes_no(call.in_voicemail),
            reserva_finalizada: format::yes_no(call.reserva_finalizada),
            transcript: call.transcript.clone(),
            recording_url: call.recording_url.clone(),
            public_log_url: call.public_log_url.clone(),
        }
    }
}
