//! Dashboard aggregation
//!
//! A single pass over the record snapshot producing the current-month
//! totals, the monthly series, the categorical distributions, the per-call
//! cost sample, per-day counts, and the average duration.
//!
//! Sums are exact `Decimal` accumulations and are never rounded here, so
//! aggregating the same snapshot twice gives equal results. Records with a
//! missing or malformed field are left out of the metrics that need that
//! field and counted in `DataQuality`.

use crate::bucketing::{day_key, month_key, month_of, MonthKey};
use callboard_core::models::{CallOutcome, CallRecord, Sentiment};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Totals restricted to the month containing `now`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentMonthTotals {
    /// Sum of `cost_with_profit`
    pub total_cost: Decimal,
    /// Calls with a completed booking
    pub reservations: usize,
    /// Calls started this month
    pub calls: usize,
}

/// One point of the monthly series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub month: MonthKey,
    pub calls: usize,
    /// Sum of `total_cost`
    pub total_cost: Decimal,
    pub reservations: usize,
}

/// Count for one sentiment category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentCount {
    pub sentiment: Sentiment,
    pub label: &'static str,
    pub value: usize,
}

/// Sentiment counts in fixed category order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentDistribution {
    /// Positive, Neutral, Negative; zero counts are kept
    pub categories: Vec<SentimentCount>,
    /// Records whose sentiment is absent or outside the closed set
    pub unrecognized: usize,
}

impl SentimentDistribution {
    /// Sum of the recognized categories
    pub fn recognized(&self) -> usize {
        self.categories.iter().map(|c| c.value).sum()
    }
}

/// Count for one call outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeCount {
    pub outcome: CallOutcome,
    pub label: &'static str,
    pub count: usize,
}

/// Per-call cost point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostPoint {
    pub call_id: String,
    /// `None` when the record has no numeric `total_cost`; plotted as a gap
    pub total_cost: Option<Decimal>,
    /// Zero when the nested breakdown is absent
    pub combined_cost: Decimal,
}

/// Calls started on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCalls {
    pub date: NaiveDate,
    pub calls: usize,
}

/// Records left out of at least one metric
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    /// Missing or unrepresentable `start_timestamp`; excluded from month and day buckets
    pub invalid_timestamp: usize,
    /// Missing or negative `duration_ms`; excluded from the average duration
    pub invalid_duration: usize,
    /// Missing or non-numeric `total_cost`; adds nothing to monthly cost sums and has no total in the cost sample
    pub invalid_total_cost: usize,
    /// Current-month records without a numeric `cost_with_profit`
    pub invalid_cost_with_profit: usize,
    /// Costs left out of a monthly or current-month sum that would pass `Decimal::MAX`
    pub cost_overflow: usize,
    /// Sentiment absent or outside the closed set
    pub unrecognized_sentiment: usize,
}

impl DataQuality {
    /// True when no record was excluded from any metric
    pub fn is_clean(&self) -> bool {
        self.invalid_timestamp == 0
            && self.invalid_duration == 0
            && self.invalid_total_cost == 0
            && self.invalid_cost_with_profit == 0
            && self.cost_overflow == 0
    }
}

/// Everything the dashboard shows, derived from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Month the current-month totals refer to
    pub current_month: MonthKey,
    pub current_month_totals: CurrentMonthTotals,
    /// Ascending by month
    pub monthly: Vec<MonthlyStats>,
    pub sentiment: SentimentDistribution,
    /// Successful first, then failed
    pub status: Vec<OutcomeCount>,
    /// Input order, untruncated
    pub cost_sample: Vec<CostPoint>,
    /// Ascending by date
    pub daily: Vec<DailyCalls>,
    /// Mean duration in seconds, 0 for an empty collection
    pub average_duration_secs: f64,
    pub record_count: usize,
    pub quality: DataQuality,
}

#[derive(Default)]
struct MonthAccumulator {
    calls: usize,
    total_cost: Decimal,
    reservations: usize,
}

/// Aggregate `records` relative to `now`, bucketing in `zone`
pub fn aggregate<Z: TimeZone>(
    records: &[CallRecord],
    now: DateTime<Utc>,
    zone: &Z,
) -> DashboardSummary {
    let current_month = month_of(now, zone);

    let mut quality = DataQuality::default();
    let mut current = CurrentMonthTotals {
        total_cost: Decimal::ZERO,
        reservations: 0,
        calls: 0,
    };
    let mut months: BTreeMap<MonthKey, MonthAccumulator> = BTreeMap::new();
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut sentiment_counts = [0usize; Sentiment::ALL.len()];
    let mut successful = 0usize;
    let mut cost_sample = Vec::with_capacity(records.len());
    let mut duration_sum: i128 = 0;
    let mut duration_count = 0usize;

    for record in records {
        // Time-bucketed metrics
        let month = record.start_timestamp.and_then(|ts| month_key(ts, zone));
        let day = record.start_timestamp.and_then(|ts| day_key(ts, zone));

        match (month, day) {
            (Some(month), Some(day)) => {
                let bucket = months.entry(month).or_default();
                bucket.calls += 1;
                if let Some(cost) = record.total_cost {
                    match bucket.total_cost.checked_add(cost) {
                        Some(sum) => bucket.total_cost = sum,
                        None => quality.cost_overflow += 1,
                    }
                }
                if record.reserva_finalizada {
                    bucket.reservations += 1;
                }

                *days.entry(day).or_insert(0) += 1;

                if month == current_month {
                    current.calls += 1;
                    if record.reserva_finalizada {
                        current.reservations += 1;
                    }
                    match record.cost_with_profit {
                        Some(cost) => match current.total_cost.checked_add(cost) {
                            Some(sum) => current.total_cost = sum,
                            None => quality.cost_overflow += 1,
                        },
                        None => quality.invalid_cost_with_profit += 1,
                    }
                }
            }
            _ => quality.invalid_timestamp += 1,
        }

        // Categorical metrics
        match record.sentiment() {
            Some(sentiment) => {
                if let Some(slot) = Sentiment::ALL.iter().position(|s| *s == sentiment) {
                    sentiment_counts[slot] += 1;
                }
            }
            None => quality.unrecognized_sentiment += 1,
        }

        if record.call_successful {
            successful += 1;
        }

        if record.total_cost.is_none() {
            quality.invalid_total_cost += 1;
        }
        cost_sample.push(CostPoint {
            call_id: record.call_id.clone(),
            total_cost: record.total_cost,
            combined_cost: record.combined_cost_or_zero(),
        });

        match record.valid_duration_ms() {
            Some(ms) => {
                duration_sum += i128::from(ms);
                duration_count += 1;
            }
            None => quality.invalid_duration += 1,
        }
    }

    let month_count = months.len();
    let day_count = days.len();

    let monthly = months
        .into_iter()
        .map(|(month, acc)| MonthlyStats {
            month,
            calls: acc.calls,
            total_cost: acc.total_cost,
            reservations: acc.reservations,
        })
        .collect();

    let daily = days
        .into_iter()
        .map(|(date, calls)| DailyCalls { date, calls })
        .collect();

    let sentiment = SentimentDistribution {
        categories: Sentiment::ALL
            .iter()
            .zip(sentiment_counts)
            .map(|(sentiment, value)| SentimentCount {
                sentiment: *sentiment,
                label: sentiment.label(),
                value,
            })
            .collect(),
        unrecognized: quality.unrecognized_sentiment,
    };

    let status = CallOutcome::ALL
        .iter()
        .map(|outcome| OutcomeCount {
            outcome: *outcome,
            label: outcome.label(),
            count: match outcome {
                CallOutcome::Successful => successful,
                CallOutcome::Failed => records.len() - successful,
            },
        })
        .collect();

    let average_duration_secs = if duration_count > 0 {
        duration_sum as f64 / duration_count as f64 / 1000.0
    } else {
        0.0
    };

    debug!(
        "Aggregated {} calls: {} this month ({}), {} months, {} days",
        records.len(),
        current.calls,
        current_month,
        month_count,
        day_count
    );

    if !quality.is_clean() {
        warn!(
            invalid_timestamp = quality.invalid_timestamp,
            invalid_duration = quality.invalid_duration,
            invalid_total_cost = quality.invalid_total_cost,
            invalid_cost_with_profit = quality.invalid_cost_with_profit,
            cost_overflow = quality.cost_overflow,
            "Skipped malformed call records during aggregation"
        );
    }

    DashboardSummary {
        current_month,
        current_month_totals: current,
        monthly,
        sentiment,
        status,
        cost_sample,
        daily,
        average_duration_secs,
        record_count: records.len(),
        quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chrono_tz::Tz;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn call(id: &str, start: &str) -> CallRecord {
        CallRecord {
            call_id: id.to_string(),
            start_timestamp: Some(at(start).timestamp_millis()),
            duration_ms: Some(60_000),
            total_cost: Some(dec!(0.10)),
            cost_with_profit: Some(dec!(0.15)),
            user_sentiment: Some("Neutral".to_string()),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        at("2026-10-16T12:00:00Z")
    }

    #[test]
    fn test_empty_collection() {
        let summary = aggregate(&[], now(), &Utc);

        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.current_month.to_string(), "2026-10");
        assert_eq!(summary.current_month_totals.total_cost, Decimal::ZERO);
        assert_eq!(summary.current_month_totals.calls, 0);
        assert!(summary.monthly.is_empty());
        assert!(summary.daily.is_empty());
        assert!(summary.cost_sample.is_empty());
        assert_eq!(summary.average_duration_secs, 0.0);
        assert!(!summary.average_duration_secs.is_nan());
        assert_eq!(summary.sentiment.categories.len(), 3);
        assert!(summary.sentiment.categories.iter().all(|c| c.value == 0));
        assert_eq!(summary.status[0].count, 0);
        assert_eq!(summary.status[1].count, 0);
    }

    #[test]
    fn test_current_month_totals_use_cost_with_profit() {
        let mut booked = call("a", "2026-10-02T09:00:00Z");
        booked.reserva_finalizada = true;
        let records = vec![booked, call("b", "2026-10-15T18:00:00Z")];

        let summary = aggregate(&records, now(), &Utc);

        assert_eq!(summary.current_month_totals.calls, 2);
        assert_eq!(summary.current_month_totals.reservations, 1);
        assert_eq!(summary.current_month_totals.total_cost, dec!(0.30));
        // The monthly series sums total_cost instead
        assert_eq!(summary.monthly[0].total_cost, dec!(0.20));
    }

    #[test]
    fn test_previous_month_within_31_days_is_excluded() {
        let recent = now() - Duration::days(20);
        let mut record = call("late-sept", "2026-09-26T12:00:00Z");
        record.start_timestamp = Some(recent.timestamp_millis());

        let summary = aggregate(&[record], now(), &Utc);

        assert_eq!(summary.current_month_totals.calls, 0);
        assert_eq!(summary.current_month_totals.total_cost, Decimal::ZERO);
        assert_eq!(summary.monthly.len(), 1);
        assert_eq!(summary.monthly[0].month.to_string(), "2026-09");
    }

    #[test]
    fn test_current_month_follows_zone() {
        // Already October in Madrid, still September in UTC
        let record = call("edge", "2026-09-30T23:30:00Z");
        let now = at("2026-10-01T08:00:00Z");

        let madrid = aggregate(std::slice::from_ref(&record), now, &Tz::Europe__Madrid);
        let utc = aggregate(std::slice::from_ref(&record), now, &Utc);

        assert_eq!(madrid.current_month_totals.calls, 1);
        assert_eq!(utc.current_month_totals.calls, 0);
    }

    #[test]
    fn test_monthly_series_sorted_for_any_permutation() {
        let records = vec![
            call("c", "2026-10-01T10:00:00Z"),
            call("a", "2025-12-24T10:00:00Z"),
            call("d", "2026-02-11T10:00:00Z"),
            call("b", "2026-01-05T10:00:00Z"),
            call("e", "2026-02-12T10:00:00Z"),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        for input in [records, reversed] {
            let summary = aggregate(&input, now(), &Utc);
            let months: Vec<String> = summary.monthly.iter().map(|m| m.month.to_string()).collect();
            assert_eq!(months, vec!["2025-12", "2026-01", "2026-02", "2026-10"]);
            assert_eq!(summary.monthly[2].calls, 2);
        }
    }

    #[test]
    fn test_monthly_partition_is_complete() {
        let records: Vec<CallRecord> = (0..40)
            .map(|i| {
                let start = at("2025-01-01T00:00:00Z") + Duration::days(i * 17);
                let mut r = call(&format!("call-{i}"), "2025-01-01T00:00:00Z");
                r.start_timestamp = Some(start.timestamp_millis());
                r
            })
            .collect();

        let summary = aggregate(&records, now(), &Utc);
        let total: usize = summary.monthly.iter().map(|m| m.calls).sum();
        assert_eq!(total, records.len());
        let daily_total: usize = summary.daily.iter().map(|d| d.calls).sum();
        assert_eq!(daily_total, records.len());
    }

    #[test]
    fn test_sentiment_shortfall_is_accounted() {
        let mut positive = call("p", "2026-10-01T10:00:00Z");
        positive.user_sentiment = Some("Positive".to_string());
        let mut negative = call("n", "2026-10-01T10:00:00Z");
        negative.user_sentiment = Some("Negative".to_string());
        let mut unknown = call("u", "2026-10-01T10:00:00Z");
        unknown.user_sentiment = Some("Unknown".to_string());
        let mut missing = call("m", "2026-10-01T10:00:00Z");
        missing.user_sentiment = None;

        let records = vec![positive, negative, unknown, missing];
        let summary = aggregate(&records, now(), &Utc);

        let labels: Vec<&str> = summary.sentiment.categories.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Positivo", "Neutral", "Negativo"]);
        let values: Vec<usize> = summary.sentiment.categories.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![1, 0, 1]);
        assert_eq!(summary.sentiment.unrecognized, 2);
        assert_eq!(
            summary.sentiment.recognized() + summary.sentiment.unrecognized,
            records.len()
        );
    }

    #[test]
    fn test_status_distribution_success_first() {
        let mut ok = call("ok", "2026-10-01T10:00:00Z");
        ok.call_successful = true;
        let records = vec![ok, call("ko1", "2026-10-01T10:00:00Z"), call("ko2", "2026-10-02T10:00:00Z")];

        let summary = aggregate(&records, now(), &Utc);

        assert_eq!(summary.status[0].outcome, CallOutcome::Successful);
        assert_eq!(summary.status[0].label, "Exitosa");
        assert_eq!(summary.status[0].count, 1);
        assert_eq!(summary.status[1].label, "Fallida");
        assert_eq!(summary.status[1].count, 2);
    }

    #[test]
    fn test_cost_sample_keeps_input_order_and_defaults_combined() {
        let mut first = call("z-first", "2026-10-01T10:00:00Z");
        first.call_cost = Some(callboard_core::models::CallCost {
            combined_cost: Some(dec!(12.5)),
            total_duration_unit_price: None,
        });
        let second = call("a-second", "2026-08-01T10:00:00Z");
        let records: Vec<CallRecord> = std::iter::once(first)
            .chain(std::iter::once(second))
            .chain((0..30).map(|i| call(&format!("x{i}"), "2026-10-03T10:00:00Z")))
            .collect();

        let summary = aggregate(&records, now(), &Utc);

        assert_eq!(summary.cost_sample.len(), 32);
        assert_eq!(summary.cost_sample[0].call_id, "z-first");
        assert_eq!(summary.cost_sample[0].total_cost, Some(dec!(0.10)));
        assert_eq!(summary.cost_sample[0].combined_cost, dec!(12.5));
        assert_eq!(summary.cost_sample[1].call_id, "a-second");
        assert_eq!(summary.cost_sample[1].combined_cost, Decimal::ZERO);
    }

    #[test]
    fn test_average_duration_seconds() {
        let mut a = call("a", "2026-10-01T10:00:00Z");
        a.duration_ms = Some(90_000);
        let mut b = call("b", "2026-10-01T11:00:00Z");
        b.duration_ms = Some(30_500);

        let summary = aggregate(&[a, b], now(), &Utc);
        assert!((summary.average_duration_secs - 60.25).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_records_are_counted_not_fatal() {
        let mut no_start = call("no-start", "2026-10-01T10:00:00Z");
        no_start.start_timestamp = None;
        let mut bad_start = call("bad-start", "2026-10-01T10:00:00Z");
        bad_start.start_timestamp = Some(i64::MAX);
        let mut no_cost = call("no-cost", "2026-10-01T10:00:00Z");
        no_cost.total_cost = None;
        no_cost.cost_with_profit = None;
        let mut no_duration = call("no-duration", "2026-10-01T10:00:00Z");
        no_duration.duration_ms = None;

        let records = vec![no_start, bad_start, no_cost, no_duration, call("ok", "2026-10-01T10:00:00Z")];
        let summary = aggregate(&records, now(), &Utc);

        assert_eq!(summary.quality.invalid_timestamp, 2);
        assert_eq!(summary.quality.invalid_total_cost, 1);
        assert_eq!(summary.quality.invalid_cost_with_profit, 1);
        assert_eq!(summary.quality.invalid_duration, 1);
        assert!(!summary.quality.is_clean());

        let bucketed: usize = summary.monthly.iter().map(|m| m.calls).sum();
        assert_eq!(bucketed, records.len() - summary.quality.invalid_timestamp);
        assert_eq!(summary.current_month_totals.calls, 3);
        assert_eq!(summary.current_month_totals.total_cost, dec!(0.30));
        assert_eq!(summary.cost_sample.len(), records.len());
        assert_eq!(summary.cost_sample[2].call_id, "no-cost");
        assert_eq!(summary.cost_sample[2].total_cost, None);
        assert_eq!(summary.cost_sample[2].combined_cost, Decimal::ZERO);
        assert_eq!(summary.status[1].count, records.len());
        assert!((summary.average_duration_secs - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_cost_sums_past_decimal_max_are_counted() {
        let huge = Decimal::from_str("50000000000000000000000000000").unwrap();
        let records: Vec<CallRecord> = (0..2)
            .map(|i| {
                let mut r = call(&format!("huge-{i}"), "2026-10-01T10:00:00Z");
                r.total_cost = Some(huge);
                r.cost_with_profit = Some(huge);
                r
            })
            .collect();

        let summary = aggregate(&records, now(), &Utc);

        assert_eq!(summary.monthly[0].calls, 2);
        assert_eq!(summary.monthly[0].total_cost, huge);
        assert_eq!(summary.current_month_totals.calls, 2);
        assert_eq!(summary.current_month_totals.total_cost, huge);
        // One from the monthly sum, one from the current-month sum
        assert_eq!(summary.quality.cost_overflow, 2);
        assert!(!summary.quality.is_clean());
        assert_eq!(summary.cost_sample[1].total_cost, Some(huge));
    }

    #[test]
    fn test_extreme_field_values_degrade() {
        let mut negative_cost = call("neg", "2026-10-01T10:00:00Z");
        negative_cost.total_cost = Some(Decimal::MIN);
        let mut max_cost = call("max", "2026-10-01T10:00:00Z");
        max_cost.total_cost = Some(Decimal::MAX);
        let mut early = call("early", "2026-10-01T10:00:00Z");
        early.start_timestamp = Some(i64::MIN);
        let mut long = call("long", "2026-10-01T10:00:00Z");
        long.duration_ms = Some(i64::MAX);

        let records = vec![negative_cost, max_cost, early, long];
        let summary = aggregate(&records, now(), &Utc);

        assert_eq!(summary.record_count, 4);
        assert_eq!(summary.quality.invalid_timestamp, 1);
        // MIN + MAX is zero, then the two small costs fit
        assert_eq!(summary.monthly[0].total_cost, dec!(0.10));
        assert_eq!(summary.quality.cost_overflow, 0);
        assert!(summary.average_duration_secs.is_finite());
        assert!(summary.average_duration_secs > 0.0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records: Vec<CallRecord> = (0..25)
            .map(|i| {
                let mut r = call(&format!("c{i}"), "2026-10-01T10:00:00Z");
                r.total_cost = Some(Decimal::new(i * 7 + 1, 3));
                r.cost_with_profit = Some(Decimal::new(i * 11 + 3, 3));
                r
            })
            .collect();

        let first = aggregate(&records, now(), &Tz::Europe__Madrid);
        let second = aggregate(&records, now(), &Tz::Europe__Madrid);
        assert_eq!(first, second);
        assert_eq!(
            first.average_duration_secs.to_bits(),
            second.average_duration_secs.to_bits()
        );
    }
}
