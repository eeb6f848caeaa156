//! Per-chair availability projection: partitions a date's candidate slots
//! into available and unavailable given the chair's existing appointments.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::models::{appointment::Appointment, chair::Chair, schedule::Schedule};
use crate::scheduling::slots::{generate_slots, InvalidRangeError};
use crate::scheduling::validity::applies_to_date;

/// The computed partition of a day's candidate slots for one chair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayAvailability {
    pub available: Vec<NaiveTime>,
    pub unavailable: Vec<NaiveTime>,
}

impl DayAvailability {
    pub fn total_slots(&self) -> usize {
        self.available.len() + self.unavailable.len()
    }
}

/// Projects the bookable slots of `chair` on `date`.
///
/// An inactive chair, a missing schedule, or a schedule that does not apply
/// to the date all yield an empty partition rather than an error. Appointment
/// timestamps are interpreted in `tz`, the business timezone the schedule's
/// times-of-day are expressed in.
pub fn project_availability(
    chair: &Chair,
    schedule: Option<&Schedule>,
    date: NaiveDate,
    appointments: &[Appointment],
    tz: &Tz,
) -> Result<DayAvailability, InvalidRangeError> {
    let schedule = match schedule {
        Some(schedule) if chair.is_bookable() && applies_to_date(schedule, date) => schedule,
        _ => return Ok(DayAvailability::default()),
    };

    let mut candidates = Vec::new();
    for range in &schedule.time_ranges {
        candidates.extend(generate_slots(range.start, range.end)?);
    }

    let occupied = occupied_start_times(appointments, date, tz);

    let mut availability = DayAvailability::default();
    for slot in candidates {
        if occupied.contains(&slot) {
            availability.unavailable.push(slot);
        } else {
            availability.available.push(slot);
        }
    }
    availability.available.sort();
    availability.unavailable.sort();

    Ok(availability)
}

/// Start times-of-day held by scheduled or confirmed appointments on `date`.
/// Cancelled appointments free their slot.
fn occupied_start_times(
    appointments: &[Appointment],
    date: NaiveDate,
    tz: &Tz,
) -> BTreeSet<NaiveTime> {
    appointments
        .iter()
        .filter(|appointment| appointment.status.occupies_slot())
        .filter_map(|appointment| {
            let local_start = appointment.datetime_start.with_timezone(tz);
            (local_start.date_naive() == date).then(|| local_start.time())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::AppointmentStatus;
    use crate::models::chair::ChairStatus;
    use crate::models::schedule::TimeRange;
    use crate::types::{ChairId, UserId};
    use chrono::{TimeZone, Utc};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn chair(status: ChairStatus) -> Chair {
        Chair::new("Lobby 1".into(), Some("HQ".into()), status)
    }

    fn schedule(ranges: Vec<(u32, u32, u32, u32)>, days: Vec<u8>) -> Schedule {
        let time_ranges = ranges
            .into_iter()
            .map(|(sh, sm, eh, em)| TimeRange {
                start: t(sh, sm),
                end: t(eh, em),
            })
            .collect();
        Schedule::new(time_ranges, days, None, None, UserId::new())
    }

    fn appointment_at(
        chair_id: ChairId,
        y: i32,
        m: u32,
        d: u32,
        h: u32,
        min: u32,
        status: AppointmentStatus,
    ) -> Appointment {
        let start = Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap();
        let mut appointment = Appointment::new(UserId::new(), chair_id, start, Utc::now());
        appointment.status = status;
        appointment
    }

    // 2025-01-06 is a Monday (day id 1).
    const MONDAY: (i32, u32, u32) = (2025, 1, 6);

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(MONDAY.0, MONDAY.1, MONDAY.2).unwrap()
    }

    #[test]
    fn partitions_booked_slot_out_of_available() {
        let chair = chair(ChairStatus::Active);
        let schedule = schedule(vec![(8, 0, 9, 0)], vec![1]);
        let booked = appointment_at(
            chair.id,
            MONDAY.0,
            MONDAY.1,
            MONDAY.2,
            8,
            30,
            AppointmentStatus::Confirmed,
        );

        let result = project_availability(
            &chair,
            Some(&schedule),
            monday(),
            &[booked],
            &chrono_tz::UTC,
        )
        .unwrap();

        assert_eq!(result.available, vec![t(8, 0)]);
        assert_eq!(result.unavailable, vec![t(8, 30)]);
    }

    #[test]
    fn cancelled_appointments_free_their_slot() {
        let chair = chair(ChairStatus::Active);
        let schedule = schedule(vec![(8, 0, 9, 0)], vec![1]);
        let cancelled = appointment_at(
            chair.id,
            MONDAY.0,
            MONDAY.1,
            MONDAY.2,
            8,
            30,
            AppointmentStatus::Cancelled,
        );

        let result = project_availability(
            &chair,
            Some(&schedule),
            monday(),
            &[cancelled],
            &chrono_tz::UTC,
        )
        .unwrap();

        assert_eq!(result.available, vec![t(8, 0), t(8, 30)]);
        assert!(result.unavailable.is_empty());
    }

    #[test]
    fn inactive_chair_yields_empty_partition() {
        for status in [ChairStatus::Maintenance, ChairStatus::Inactive] {
            let chair = chair(status);
            let schedule = schedule(vec![(8, 0, 9, 0)], vec![1]);
            let result = project_availability(
                &chair,
                Some(&schedule),
                monday(),
                &[],
                &chrono_tz::UTC,
            )
            .unwrap();
            assert_eq!(result, DayAvailability::default());
        }
    }

    #[test]
    fn missing_schedule_yields_empty_partition() {
        let chair = chair(ChairStatus::Active);
        let result =
            project_availability(&chair, None, monday(), &[], &chrono_tz::UTC).unwrap();
        assert_eq!(result, DayAvailability::default());
    }

    #[test]
    fn inapplicable_day_yields_empty_partition() {
        let chair = chair(ChairStatus::Active);
        // Tuesday-only schedule, projected on a Monday.
        let schedule = schedule(vec![(8, 0, 9, 0)], vec![2]);
        let result = project_availability(
            &chair,
            Some(&schedule),
            monday(),
            &[],
            &chrono_tz::UTC,
        )
        .unwrap();
        assert_eq!(result, DayAvailability::default());
    }

    #[test]
    fn multiple_ranges_concatenate_in_order() {
        let chair = chair(ChairStatus::Active);
        let schedule = schedule(vec![(8, 0, 9, 0), (13, 0, 14, 0)], vec![1]);
        let result = project_availability(
            &chair,
            Some(&schedule),
            monday(),
            &[],
            &chrono_tz::UTC,
        )
        .unwrap();
        assert_eq!(
            result.available,
            vec![t(8, 0), t(8, 30), t(13, 0), t(13, 30)]
        );
    }

    #[test]
    fn partition_is_complete_and_disjoint() {
        let chair = chair(ChairStatus::Active);
        let schedule = schedule(vec![(8, 0, 10, 0)], vec![1]);
        let booked = appointment_at(
            chair.id,
            MONDAY.0,
            MONDAY.1,
            MONDAY.2,
            9,
            0,
            AppointmentStatus::Scheduled,
        );

        let result = project_availability(
            &chair,
            Some(&schedule),
            monday(),
            &[booked],
            &chrono_tz::UTC,
        )
        .unwrap();

        let mut union: Vec<_> = result
            .available
            .iter()
            .chain(result.unavailable.iter())
            .copied()
            .collect();
        union.sort();
        assert_eq!(union, vec![t(8, 0), t(8, 30), t(9, 0), t(9, 30)]);
        assert!(result.available.iter().all(|s| !result.unavailable.contains(s)));
    }

    #[test]
    fn appointment_on_other_date_does_not_block() {
        let chair = chair(ChairStatus::Active);
        let schedule = schedule(vec![(8, 0, 9, 0)], vec![1]);
        // Same time-of-day, one week later.
        let other_day = appointment_at(
            chair.id,
            2025,
            1,
            13,
            8,
            30,
            AppointmentStatus::Confirmed,
        );

        let result = project_availability(
            &chair,
            Some(&schedule),
            monday(),
            &[other_day],
            &chrono_tz::UTC,
        )
        .unwrap();

        assert_eq!(result.available, vec![t(8, 0), t(8, 30)]);
    }

    #[test]
    fn occupancy_respects_business_timezone() {
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        let chair = chair(ChairStatus::Active);
        let schedule = schedule(vec![(8, 0, 9, 0)], vec![1]);
        // 2025-01-05 23:30 UTC is 2025-01-06 08:30 JST.
        let booked = appointment_at(
            chair.id,
            2025,
            1,
            5,
            23,
            30,
            AppointmentStatus::Confirmed,
        );

        let result =
            project_availability(&chair, Some(&schedule), monday(), &[booked], &tz).unwrap();

        assert_eq!(result.available, vec![t(8, 0)]);
        assert_eq!(result.unavailable, vec![t(8, 30)]);
    }

    #[test]
    fn misconfigured_range_propagates_invalid_range() {
        let chair = chair(ChairStatus::Active);
        let schedule = schedule(vec![(9, 0, 8, 0)], vec![1]);
        let result =
            project_availability(&chair, Some(&schedule), monday(), &[], &chrono_tz::UTC);
        assert!(result.is_err());
    }
}
