//! Schedule validity: is the schedule active now, and does it apply to a
//! given calendar date.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::models::schedule::Schedule;

/// Exact-timestamp check against the schedule's validity window. Missing
/// bounds are unbounded in that direction. Whole-day inclusivity comes from
/// the write path, which stores the lower bound at start-of-day and the
/// upper bound at end-of-day.
pub fn is_active_at(schedule: &Schedule, now: DateTime<Utc>) -> bool {
    if let Some(valid_from) = schedule.valid_from {
        if now < valid_from {
            return false;
        }
    }
    if let Some(valid_to) = schedule.valid_to {
        if now > valid_to {
            return false;
        }
    }
    true
}

/// Date-granular check: the date's weekday must be one of the schedule's
/// days and the validity window, compared at date precision, must cover it.
pub fn applies_to_date(schedule: &Schedule, date: NaiveDate) -> bool {
    if !schedule.includes_weekday(date.weekday()) {
        return false;
    }
    if let Some(valid_from) = schedule.valid_from {
        if date < valid_from.date_naive() {
            return false;
        }
    }
    if let Some(valid_to) = schedule.valid_to {
        if date > valid_to.date_naive() {
            return false;
        }
    }
    true
}
