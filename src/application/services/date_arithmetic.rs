//! Date arithmetic service module
//!
//! Business-day add/subtract over a weekday-only calendar (no holidays).
//! Dates are ISO calendar dates with no time-of-day component (§4.2).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Adds `days` business days to `date`, skipping Saturdays and Sundays.
/// Adding zero returns `date` unchanged even if it falls on a weekend — the
/// move only happens on a positive delta.
pub fn add_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = days;
    while remaining > 0 {
        current += Duration::days(1);
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}

/// Subtracts `days` business days from `date`, skipping Saturdays and
/// Sundays. Symmetric to [`add_business_days`].
pub fn subtract_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = days;
    while remaining > 0 {
        current -= Duration::days(1);
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
