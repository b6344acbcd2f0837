//! Next-occurrence calendar arithmetic.

use crate::model::recurrence::{CustomUnit, Recurrence, RecurrenceRule};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Computes the next date on which a task recurs after `current`.
///
/// Returns `None` only when the rule data cannot produce a date: a
/// weekday set containing no valid weekday, a pinned day/month outside
/// the calendar, or checked date arithmetic leaving the representable
/// range. The `end_date` cutoff is deliberately not applied here.
pub fn next_occurrence(current: NaiveDate, recurrence: &Recurrence) -> Option<NaiveDate> {
    match &recurrence.rule {
        RecurrenceRule::Daily { interval } => add_days(current, *interval),
        RecurrenceRule::Weekly {
            interval,
            days_of_week,
        } => {
            if days_of_week.is_empty() {
                add_weeks(current, *interval)
            } else {
                next_matching_weekday(current, days_of_week)
            }
        }
        RecurrenceRule::Monthly {
            interval,
            day_of_month,
        } => {
            let advanced = add_months(current, *interval)?;
            match day_of_month {
                Some(day) => pin_day(advanced.year(), advanced.month(), *day),
                None => Some(advanced),
            }
        }
        RecurrenceRule::Yearly {
            interval,
            day_of_month,
            month_of_year,
        } => {
            let advanced = add_years(current, *interval)?;
            match (day_of_month, month_of_year) {
                (Some(day), Some(month)) => {
                    pin_day(advanced.year(), u32::from(*month), *day)
                }
                _ => Some(advanced),
            }
        }
        RecurrenceRule::Custom { interval, unit } => {
            match unit.unwrap_or(CustomUnit::Day) {
                CustomUnit::Day => add_days(current, *interval),
                CustomUnit::Week => add_weeks(current, *interval),
                CustomUnit::Month => add_months(current, *interval),
                CustomUnit::Year => add_years(current, *interval),
            }
        }
    }
}

/// Number of days in `month` of `year`, leap-year correct.
///
/// Derived from the first day of the following month, so February
/// yields 29 exactly when `year` is a leap year.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
}

fn add_days(current: NaiveDate, interval: u32) -> Option<NaiveDate> {
    current.checked_add_days(Days::new(u64::from(interval)))
}

fn add_weeks(current: NaiveDate, interval: u32) -> Option<NaiveDate> {
    current.checked_add_days(Days::new(u64::from(interval) * 7))
}

fn add_months(current: NaiveDate, interval: u32) -> Option<NaiveDate> {
    // chrono clamps the day to the target month length, which is the
    // wanted behavior for "advance keeping the same day".
    current.checked_add_months(Months::new(interval))
}

fn add_years(current: NaiveDate, interval: u32) -> Option<NaiveDate> {
    current.checked_add_months(Months::new(interval.checked_mul(12)?))
}

/// First date strictly after `current` whose weekday (0=Sunday..6=
/// Saturday) is in `days_of_week`. Seven candidates cover every
/// weekday, so a set without a valid member yields `None` instead of
/// scanning forever.
fn next_matching_weekday(
    current: NaiveDate,
    days_of_week: &std::collections::BTreeSet<u8>,
) -> Option<NaiveDate> {
    let mut candidate = current.succ_opt()?;
    for _ in 0..7 {
        let weekday = candidate.weekday().num_days_from_sunday();
        if days_of_week.contains(&u8::try_from(weekday).ok()?) {
            return Some(candidate);
        }
        candidate = candidate.succ_opt()?;
    }
    None
}

/// Builds `year-month-day` with `day` clamped to the month length.
fn pin_day(year: i32, month: u32, day: u8) -> Option<NaiveDate> {
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, u32::from(day).min(last))
}
