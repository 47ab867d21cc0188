//! Dashboard DTOs

use super::common::SnapshotMeta;
use super::format;
use callboard_analytics::aggregation::{
    CostPoint, MonthlyStats, OutcomeCount, SentimentCount,
};
use callboard_analytics::{DashboardSummary, DataQuality, Snapshot};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Current-month summary cards
#[derive(Debug, Clone, Serialize)]
pub struct CurrentMonthCards {
    /// Month the cards refer to (`YYYY-MM`)
    pub month: String,
    pub total_cost: Decimal,
    /// `total_cost` to 2 decimal places
    pub total_cost_display: String,
    pub reservations: usize,
    pub calls: usize,
}

/// Sentiment pie data
#[derive(Debug, Clone, Serialize)]
pub struct SentimentChart {
    pub categories: Vec<SentimentCount>,
    /// Records outside the three categories
    pub unrecognized: usize,
}

/// One bar of the calls-per-day chart
#[derive(Debug, Clone, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    /// `d/m/yyyy`
    pub label: String,
    pub calls: usize,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub current_month: CurrentMonthCards,
    pub monthly: Vec<MonthlyStats>,
    pub sentiment: SentimentChart,
    pub status: Vec<OutcomeCount>,
    /// First entries of the per-call cost sample
    pub cost_sample: Vec<CostPoint>,
    /// Size of the untruncated cost sample
    pub cost_sample_total: usize,
    pub daily: Vec<DailyPoint>,
    pub average_duration_secs: f64,
    /// Average duration to 2 decimal places
    pub average_duration_display: String,
    pub record_count: usize,
    pub quality: DataQuality,
    pub snapshot: SnapshotMeta,
}

impl DashboardResponse {
    /// Build the response, keeping at most `cost_sample_display` cost points
    pub fn new(summary: &DashboardSummary, snapshot: &Snapshot, cost_sample_display: usize) -> Self {
        let totals = &summary.current_month_totals;

        Self {
            current_month: CurrentMonthCards {
                month: summary.current_month.to_string(),
                total_cost: totals.total_cost,
                total_cost_display: format::decimal(totals.total_cost, 2),
                reservations: totals.reservations,
                calls: totals.calls,
            },
            monthly: summary.monthly.clone(),
            sentiment: SentimentChart {
                categories: summary.sentiment.categories.clone(),
                unrecognized: summary.sentiment.unrecognized,
            },
            status: summary.status.clone(),
            cost_sample: summary
                .cost_sample
                .iter()
                .take(cost_sample_display)
                .cloned()
                .collect(),
            cost_sample_total: summary.cost_sample.len(),
            daily: summary
                .daily
                .iter()
                .map(|d| DailyPoint {
                    date: d.date,
                    label: format::day_label(d.date),
                    calls: d.calls,
                })
                .collect(),
            average_duration_secs: summary.average_duration_secs,
            average_duration_display: format!("{:.2}", summary.average_duration_secs),
            record_count: summary.record_count,
            quality: summary.quality.clone(),
            snapshot: SnapshotMeta::from(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callboard_analytics::aggregate;
    use callboard_core::models::CallRecord;
    use chrono::{DateTime, Utc};
    use chrono_tz::Tz;
    use rust_decimal_macros::dec;

    fn snapshot(n: usize) -> Snapshot {
        let records = (0..n)
            .map(|i| CallRecord {
                call_id: format!("call-{i}"),
                start_timestamp: Some(1_791_446_400_000 + i as i64 * 3_600_000), // 2026-10-08T08:00:00Z
                duration_ms: Some(61_000),
                total_cost: Some(dec!(0.1)),
                cost_with_profit: Some(dec!(0.105)),
                ..Default::default()
            })
            .collect();
        Snapshot::new(records)
    }

    #[test]
    fn test_cost_sample_truncated_for_display() {
        let snapshot = snapshot(32);
        let now = DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let summary = aggregate(snapshot.records(), now, &Tz::Europe__Madrid);

        let response = DashboardResponse::new(&summary, &snapshot, 20);

        assert_eq!(response.cost_sample.len(), 20);
        assert_eq!(response.cost_sample_total, 32);
        assert_eq!(response.cost_sample[0].call_id, "call-0");
        assert_eq!(response.current_month.month, "2026-10");
        assert_eq!(response.current_month.total_cost, dec!(3.360));
        assert_eq!(response.current_month.total_cost_display, "3.36");
        assert_eq!(response.average_duration_display, "61.00");
        assert_eq!(response.daily[0].label, "8/10/2026");
        assert_eq!(response.snapshot.records, 32);
    }

    #[test]
    fn test_cost_sample_keeps_gap_for_missing_cost() {
        let mut records = snapshot(3).records().to_vec();
        records[1].total_cost = None;
        let snapshot = Snapshot::new(records);
        let summary = aggregate(snapshot.records(), Utc::now(), &Utc);

        let response = DashboardResponse::new(&summary, &snapshot, 20);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(response.cost_sample_total, 3);
        assert_eq!(json["cost_sample"][1]["call_id"], "call-1");
        assert!(json["cost_sample"][1]["total_cost"].is_null());
        assert_eq!(json["quality"]["invalid_total_cost"], 1);
        assert_eq!(json["quality"]["cost_overflow"], 0);
    }
}
