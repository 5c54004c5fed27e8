//! Calendar arithmetic on wall-clock datetimes.
//!
//! Everything here operates on [`NaiveDateTime`]: the layout works in the
//! wall-clock time of the column being drawn and never converts between
//! time zones. Comparisons and differences take a [`Unit`] and truncate both
//! operands to that unit first, so `lt(a, b, Unit::Minute)` ignores seconds.

use chrono::{
    Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc,
    Weekday,
};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Calendar units understood by the date helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    /// Length of the unit in seconds, for units with a fixed length.
    const fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Second => Some(1),
            Self::Minute => Some(60),
            Self::Hour => Some(3_600),
            Self::Day => Some(86_400),
            Self::Week => Some(604_800),
            Self::Month | Self::Year => None,
        }
    }
}

/// Week start used by comparisons and differences that do not take one.
const DEFAULT_WEEK_START: Weekday = Weekday::Mon;

/// Replaces the time of day, keeping the date.
fn at_time(dt: NaiveDateTime, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveTime::from_hms_opt(hour, minute, second).map_or(dt, |t| dt.date().and_time(t))
}

/// Truncates `dt` to the beginning of the enclosing `unit`.
///
/// Weeks begin on `week_start`; the argument is ignored for other units.
pub fn start_of(dt: NaiveDateTime, unit: Unit, week_start: Weekday) -> NaiveDateTime {
    match unit {
        Unit::Second => at_time(dt, dt.hour(), dt.minute(), dt.second()),
        Unit::Minute => at_time(dt, dt.hour(), dt.minute(), 0),
        Unit::Hour => at_time(dt, dt.hour(), 0, 0),
        Unit::Day => dt.date().and_time(NaiveTime::MIN),
        Unit::Week => {
            let weekday = dt.weekday().num_days_from_monday();
            let offset = (weekday + 7 - week_start.num_days_from_monday()) % 7;
            dt.date()
                .checked_sub_signed(TimeDelta::days(i64::from(offset)))
                .map_or(dt, |d| d.and_time(NaiveTime::MIN))
        }
        Unit::Month => NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1)
            .map_or(dt, |d| d.and_time(NaiveTime::MIN)),
        Unit::Year => {
            NaiveDate::from_ymd_opt(dt.year(), 1, 1).map_or(dt, |d| d.and_time(NaiveTime::MIN))
        }
    }
}

/// Returns the last millisecond of the enclosing `unit`.
pub fn end_of(dt: NaiveDateTime, unit: Unit, week_start: Weekday) -> Option<NaiveDateTime> {
    let next = add(start_of(dt, unit, week_start), 1, unit)?;
    next.checked_sub_signed(TimeDelta::milliseconds(1))
}

/// Adds `amount` units to `dt`. Negative amounts subtract.
///
/// Months and years are calendar-aware: adding one month to January 31st
/// lands on the last day of February. Returns `None` on overflow.
pub fn add(dt: NaiveDateTime, amount: i64, unit: Unit) -> Option<NaiveDateTime> {
    match unit {
        Unit::Second => dt.checked_add_signed(TimeDelta::try_seconds(amount)?),
        Unit::Minute => dt.checked_add_signed(TimeDelta::try_minutes(amount)?),
        Unit::Hour => dt.checked_add_signed(TimeDelta::try_hours(amount)?),
        Unit::Day => dt.checked_add_signed(TimeDelta::try_days(amount)?),
        Unit::Week => dt.checked_add_signed(TimeDelta::try_weeks(amount)?),
        Unit::Month => add_months(dt, amount),
        Unit::Year => add_months(dt, amount.checked_mul(12)?),
    }
}

fn add_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(magnitude)
    } else {
        dt.checked_sub_months(magnitude)
    }
}

/// True when `a` and `b` fall in the same `unit`.
pub fn eq(a: NaiveDateTime, b: NaiveDateTime, unit: Unit) -> bool {
    start_of(a, unit, DEFAULT_WEEK_START) == start_of(b, unit, DEFAULT_WEEK_START)
}

/// True when `a` is strictly before `b` once both are truncated to `unit`.
pub fn lt(a: NaiveDateTime, b: NaiveDateTime, unit: Unit) -> bool {
    start_of(a, unit, DEFAULT_WEEK_START) < start_of(b, unit, DEFAULT_WEEK_START)
}

/// True when `a` is before or within the same `unit` as `b`.
pub fn lte(a: NaiveDateTime, b: NaiveDateTime, unit: Unit) -> bool {
    start_of(a, unit, DEFAULT_WEEK_START) <= start_of(b, unit, DEFAULT_WEEK_START)
}

/// Combines the calendar day of `date` with the time of day of `time`.
pub fn merge(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Absolute number of whole `unit`s between `a` and `b`, after truncating
/// both to `unit`.
pub fn diff(a: NaiveDateTime, b: NaiveDateTime, unit: Unit) -> i64 {
    let a = start_of(a, unit, DEFAULT_WEEK_START);
    let b = start_of(b, unit, DEFAULT_WEEK_START);
    match unit.fixed_seconds() {
        Some(seconds) => ((a - b).num_seconds() / seconds).abs(),
        None => {
            let months = |d: NaiveDateTime| i64::from(d.year()) * 12 + i64::from(d.month0());
            let delta = (months(a) - months(b)).abs();
            if unit == Unit::Year { delta / 12 } else { delta }
        }
    }
}

/// The current calendar date as seen in `tz`.
pub fn today_in<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, LayoutError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| LayoutError::InvalidTimeOfDay {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid test datetime")
    }

    #[test]
    fn test_start_of_truncates_each_unit() {
        // 2025-01-29 is a Wednesday
        let t = dt(2025, 1, 29, 14, 37, 52);

        assert_eq!(start_of(t, Unit::Minute, Weekday::Mon), dt(2025, 1, 29, 14, 37, 0));
        assert_eq!(start_of(t, Unit::Hour, Weekday::Mon), dt(2025, 1, 29, 14, 0, 0));
        assert_eq!(start_of(t, Unit::Day, Weekday::Mon), dt(2025, 1, 29, 0, 0, 0));
        assert_eq!(start_of(t, Unit::Week, Weekday::Mon), dt(2025, 1, 27, 0, 0, 0));
        assert_eq!(start_of(t, Unit::Week, Weekday::Sun), dt(2025, 1, 26, 0, 0, 0));
        assert_eq!(start_of(t, Unit::Month, Weekday::Mon), dt(2025, 1, 1, 0, 0, 0));
        assert_eq!(start_of(t, Unit::Year, Weekday::Mon), dt(2025, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_start_of_week_on_week_start_day_is_same_day() {
        let monday = dt(2025, 1, 27, 9, 0, 0);
        assert_eq!(start_of(monday, Unit::Week, Weekday::Mon), dt(2025, 1, 27, 0, 0, 0));
    }

    #[test]
    fn test_start_of_week_before_earliest_date_keeps_input() {
        let earliest = NaiveDate::MIN.and_time(NaiveTime::MIN);
        let week_start = earliest.weekday().succ();
        assert_eq!(start_of(earliest, Unit::Week, week_start), earliest);
    }

    #[test]
    fn test_end_of_day_is_last_millisecond() {
        let t = dt(2025, 1, 29, 14, 37, 52);
        let end = end_of(t, Unit::Day, Weekday::Mon).unwrap();
        assert_eq!(end.date(), t.date());
        assert_eq!(end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let jan31 = dt(2024, 1, 31, 10, 0, 0);
        assert_eq!(add(jan31, 1, Unit::Month), Some(dt(2024, 2, 29, 10, 0, 0)));
        assert_eq!(add(jan31, -2, Unit::Month), Some(dt(2023, 11, 30, 10, 0, 0)));
        assert_eq!(add(jan31, 1, Unit::Year), Some(dt(2025, 1, 31, 10, 0, 0)));
    }

    #[test]
    fn test_add_fixed_units() {
        let t = dt(2025, 1, 29, 23, 30, 0);
        assert_eq!(add(t, 45, Unit::Minute), Some(dt(2025, 1, 30, 0, 15, 0)));
        assert_eq!(add(t, -1, Unit::Day), Some(dt(2025, 1, 28, 23, 30, 0)));
        assert_eq!(add(t, 1, Unit::Week), Some(dt(2025, 2, 5, 23, 30, 0)));
    }

    #[test]
    fn test_add_overflow_returns_none() {
        let t = dt(2025, 1, 29, 0, 0, 0);
        assert_eq!(add(t, i64::MAX, Unit::Day), None);
        assert_eq!(add(t, i64::MAX, Unit::Year), None);
    }

    #[test]
    fn test_comparisons_truncate_to_unit() {
        let a = dt(2025, 1, 29, 9, 0, 10);
        let b = dt(2025, 1, 29, 9, 0, 50);

        assert!(eq(a, b, Unit::Minute));
        assert!(!lt(a, b, Unit::Minute));
        assert!(lt(a, b, Unit::Second));
        assert!(lte(b, a, Unit::Minute));
        assert!(!lte(b, a, Unit::Second));
    }

    #[test]
    fn test_merge_takes_day_from_date_and_time_from_time() {
        let merged = merge(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            dt(2020, 7, 4, 9, 45, 0).time(),
        );
        assert_eq!(merged, dt(2025, 3, 1, 9, 45, 0));
    }

    #[test]
    fn test_diff_is_absolute_and_truncated() {
        let a = dt(2025, 1, 29, 9, 0, 59);
        let b = dt(2025, 1, 29, 10, 30, 0);

        assert_eq!(diff(a, b, Unit::Minute), 90);
        assert_eq!(diff(b, a, Unit::Minute), 90);
        assert_eq!(diff(a, b, Unit::Hour), 1);
        assert_eq!(diff(dt(2024, 11, 30, 0, 0, 0), dt(2025, 2, 1, 0, 0, 0), Unit::Month), 3);
        assert_eq!(diff(dt(2023, 12, 31, 0, 0, 0), dt(2025, 1, 1, 0, 0, 0), Unit::Year), 2);
    }

    #[test]
    fn test_today_in_utc_matches_now() {
        let before = Utc::now().date_naive();
        let today = today_in(&Utc);
        let after = Utc::now().date_naive();
        assert!(today == before || today == after);
    }

    #[test]
    fn test_parse_time_of_day_accepts_both_precisions() {
        assert_eq!(
            parse_time_of_day("08:30").unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time_of_day(" 23:59:59 ").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_parse_time_of_day_rejects_garbage() {
        let err = parse_time_of_day("9am").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidTimeOfDay {
                value: "9am".to_string()
            }
        );
    }
}
