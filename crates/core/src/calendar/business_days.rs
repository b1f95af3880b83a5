//! Pure business-day counting.
//!
//! A business day is a calendar day that is neither a Saturday/Sunday nor
//! a jurisdictional holiday. The counter is synchronous and pure; holiday
//! membership comes in as a predicate, so the caller must have populated
//! the [`super::HolidayDirectory`] for every year spanned by the window
//! before calling.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use flowtrack_domain::normalize::truncate_to_day;

/// Count inclusive business days between `start` and `end`.
///
/// Returns 0 when `end < start`. Both bounds are calendar days; weekends
/// and days for which `is_holiday` returns true do not count.
pub fn count_business_days_inclusive<F>(start: NaiveDate, end: NaiveDate, is_holiday: F) -> u32
where
    F: Fn(NaiveDate) -> bool,
{
    if end < start {
        return 0;
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !is_weekend(*day) && !is_holiday(*day))
        .count() as u32
}

/// Every calendar year from `start`'s year to `end`'s year, inclusive.
///
/// Empty when `end` is in an earlier year than `start`.
#[must_use]
pub fn years_between(start: NaiveDate, end: NaiveDate) -> Vec<i32> {
    (start.year()..=end.year()).collect()
}

/// Development time of a work item in business days.
///
/// `end` is the day of `closed_date`; an item that is still open has no
/// development time (`None`, never 0). `start` is the day of
/// `activated_date`, falling back to `created_date`.
pub fn development_business_days<F>(
    created_date: DateTime<Utc>,
    activated_date: Option<DateTime<Utc>>,
    closed_date: Option<DateTime<Utc>>,
    is_holiday: F,
) -> Option<u32>
where
    F: Fn(NaiveDate) -> bool,
{
    let end = truncate_to_day(closed_date?);
    let start = truncate_to_day(activated_date.unwrap_or(created_date));
    Some(count_business_days_inclusive(start, end, is_holiday))
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}
