//! Weekly availability schedule: a set of bookable time ranges, the weekdays
//! they apply to, and an optional validity window.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::{ScheduleId, TimeRangeId, UserId};
use crate::utils::time::hhmm;

/// One bookable window within an applicable day. Multiple non-overlapping
/// ranges per schedule are allowed (e.g. morning + afternoon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeRange {
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "08:00")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "12:00")]
    pub end: NaiveTime,
}

/// Database row backing one time range of a schedule.
#[derive(Debug, Clone, FromRow)]
pub struct TimeRangeRow {
    pub id: TimeRangeId,
    pub schedule_id: ScheduleId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub position: i16,
}

impl From<&TimeRangeRow> for TimeRange {
    fn from(row: &TimeRangeRow) -> Self {
        Self {
            start: row.start_time,
            end: row.end_time,
        }
    }
}

/// Database row for the schedule itself; ranges and weekdays live in child
/// tables and are assembled by the repository.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    pub id: ScheduleId,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully assembled weekly schedule.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: ScheduleId,
    pub time_ranges: Vec<TimeRange>,
    /// Weekday identifiers, Sunday = 0 through Saturday = 6.
    pub days: Vec<u8>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(
        time_ranges: Vec<TimeRange>,
        days: Vec<u8>,
        valid_from: Option<DateTime<Utc>>,
        valid_to: Option<DateTime<Utc>>,
        created_by: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ScheduleId::new(),
            time_ranges,
            days,
            valid_from,
            valid_to,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` when the schedule covers the given weekday.
    pub fn includes_weekday(&self, weekday: Weekday) -> bool {
        let day_id = weekday.num_days_from_sunday() as u8;
        self.days.contains(&day_id)
    }
}

/// Converts a client-supplied day-granular validity window into the stored
/// timestamp bounds: start-of-day for the lower bound, end-of-day for the
/// upper bound, both UTC.
pub fn normalize_validity_window(
    valid_from: Option<NaiveDate>,
    valid_to: Option<NaiveDate>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let from = valid_from.map(start_of_day_utc);
    let to = valid_to.map(|date| {
        start_of_day_utc(date) + Duration::days(1) - Duration::milliseconds(1)
    });
    (from, to)
}

fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Returns the Sunday-based weekday identifier for a date.
pub fn day_id_of(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedulePayload {
    pub time_ranges: Vec<TimeRange>,
    pub day_ids: Vec<u8>,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[schema(value_type = String)]
    pub id: ScheduleId,
    pub time_ranges: Vec<TimeRange>,
    pub day_ids: Vec<u8>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
}

impl From<Schedule> for ScheduleResponse {
    fn from(schedule: Schedule) -> Self {
        Self {
            id: schedule.id,
            time_ranges: schedule.time_ranges,
            day_ids: schedule.days,
            valid_from: schedule.valid_from,
            valid_to: schedule.valid_to,
        }
    }
}
