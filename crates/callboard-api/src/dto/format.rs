//! Display formatting for call fields
//!
//! Rounding happens only here; the analytics engine keeps exact values.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder for absent or malformed values
pub const MISSING: &str = "-";

/// Amount to `dp` decimal places, half away from zero
pub fn decimal(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Money to 2 decimal places
pub fn money(value: Option<Decimal>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| decimal(v, 2))
}

/// Unit price to 4 decimal places
pub fn unit_price(value: Option<Decimal>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| decimal(v, 4))
}

/// `"{m}m {s}s"` from milliseconds
pub fn duration(ms: Option<i64>) -> String {
    match ms {
        Some(ms) if ms >= 0 => format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000),
        _ => MISSING.to_string(),
    }
}

/// `d/m/yyyy, HH:MM:SS` in `zone`
pub fn datetime(instant: Option<DateTime<Utc>>, zone: &Tz) -> String {
    instant.map_or_else(
        || MISSING.to_string(),
        |i| i.with_timezone(zone).format("%-d/%-m/%Y, %H:%M:%S").to_string(),
    )
}

/// `d/m/yyyy`
pub fn day_label(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Sí"
    } else {
        "No"
    }
}

/// `"{n} ms"`
pub fn latency(ms: Option<i64>) -> String {
    ms.map_or_else(|| MISSING.to_string(), |n| format!("{} ms", n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounding() {
        assert_eq!(money(Some(dec!(0.125))), "0.13");
        assert_eq!(money(Some(dec!(3))), "3.00");
        assert_eq!(money(Some(dec!(-1.005))), "-1.01");
        assert_eq!(money(None), "-");
    }

    #[test]
    fn test_unit_price() {
        assert_eq!(unit_price(Some(dec!(0.0016666))), "0.0017");
        assert_eq!(unit_price(Some(dec!(0.1))), "0.1000");
    }

    #[test]
    fn test_duration() {
        assert_eq!(duration(Some(95_400)), "1m 35s");
        assert_eq!(duration(Some(59_999)), "0m 59s");
        assert_eq!(duration(Some(0)), "0m 0s");
        assert_eq!(duration(Some(-5)), "-");
        assert_eq!(duration(None), "-");
    }

    #[test]
    fn test_datetime_in_zone() {
        let instant = DateTime::parse_from_rfc3339("2026-01-05T08:04:09Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(datetime(Some(instant), &Tz::Europe__Madrid), "5/1/2026, 09:04:09");
        assert_eq!(datetime(None, &Tz::UTC), "-");
    }

    #[test]
    fn test_day_label_and_flags() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        assert_eq!(day_label(date), "3/10/2026");
        assert_eq!(yes_no(true), "Sí");
        assert_eq!(yes_no(false), "No");
        assert_eq!(latency(Some(812)), "812 ms");
    }
}
