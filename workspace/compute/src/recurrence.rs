//! Due-date arithmetic for recurring tasks.
//!
//! Intervals map to fixed day offsets. There is no calendar-aware month or
//! year handling: "monthly" is always 30 days and "yearly" always 365.

use chrono::{Duration, NaiveDate};
use model::entities::task::TaskInterval;
use tracing::trace;

/// Number of days an interval advances the due date, `None` for one-time tasks.
pub fn interval_days(interval: TaskInterval) -> Option<i64> {
    match interval {
        TaskInterval::Daily => Some(1),
        TaskInterval::Weekly => Some(7),
        TaskInterval::Monthly => Some(30),
        TaskInterval::Quarterly => Some(91),
        TaskInterval::Yearly => Some(365),
        TaskInterval::OneTime => None,
    }
}

/// Next due date for a typed interval.
pub fn next_due_date(interval: TaskInterval, start_date: NaiveDate) -> NaiveDate {
    match interval_days(interval) {
        Some(days) => start_date + Duration::days(days),
        None => start_date,
    }
}

/// Next due date for a raw interval tag as submitted by a form.
///
/// Empty or unrecognized tags behave as one-time and return `start_date`.
pub fn compute_next_due_date(interval: &str, start_date: NaiveDate) -> NaiveDate {
    let parsed = TaskInterval::from_tag(interval);
    let next = next_due_date(parsed, start_date);
    trace!("Interval {:?} ({:?}) from {} -> {}", interval, parsed, start_date, next);
    next
}
