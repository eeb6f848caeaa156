//! 30-minute slot generation over a time-of-day range.

use chrono::{Duration, NaiveTime};
use thiserror::Error;

/// Fixed length of a bookable slot.
pub const SLOT_DURATION_MINUTES: i64 = 30;

/// A time range whose start is not strictly before its end. Distinguishes a
/// misconfigured schedule from the ordinary empty case of an inapplicable day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid time range: start {start} is not before end {end}")]
pub struct InvalidRangeError {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Generates the ordered slot start times within `[start, end)`.
///
/// Starting at `start`, a slot start is emitted every 30 minutes while it is
/// strictly before `end`; the end boundary itself is never a slot start, and
/// a trailing remainder shorter than a full step yields nothing further.
pub fn generate_slots(
    start: NaiveTime,
    end: NaiveTime,
) -> Result<Vec<NaiveTime>, InvalidRangeError> {
    if start >= end {
        return Err(InvalidRangeError { start, end });
    }

    let step = Duration::minutes(SLOT_DURATION_MINUTES);
    let mut slots = Vec::new();
    let mut cursor = start;
    while cursor < end {
        slots.push(cursor);
        let (next, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 {
            // Stepped past midnight; the range cannot extend further.
            break;
        }
        cursor = next;
    }

    Ok(slots)
}

/// Number of slots `generate_slots` produces for the same range.
pub fn count_slots(start: NaiveTime, end: NaiveTime) -> Result<usize, InvalidRangeError> {
    if start >= end {
        return Err(InvalidRangeError { start, end });
    }
    let minutes = (end - start).num_minutes();
    Ok(((minutes + SLOT_DURATION_MINUTES - 1) / SLOT_DURATION_MINUTES) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn hhmm(times: &[NaiveTime]) -> Vec<String> {
        times.iter().map(|t| t.format("%H:%M").to_string()).collect()
    }

    #[test]
    fn generates_slots_for_exact_multiple() {
        let slots = generate_slots(t(9, 0), t(10, 0)).unwrap();
        assert_eq!(hhmm(&slots), vec!["09:00", "09:30"]);
    }

    #[test]
    fn drops_trailing_partial_interval() {
        let slots = generate_slots(t(9, 0), t(10, 15)).unwrap();
        assert_eq!(hhmm(&slots), vec!["09:00", "09:30", "10:00"]);
    }

    #[test]
    fn end_boundary_is_never_a_slot_start() {
        let slots = generate_slots(t(8, 0), t(8, 30)).unwrap();
        assert_eq!(hhmm(&slots), vec!["08:00"]);
    }

    #[test]
    fn rejects_inverted_and_empty_ranges() {
        assert!(generate_slots(t(10, 0), t(9, 0)).is_err());
        assert!(generate_slots(t(9, 0), t(9, 0)).is_err());
        assert!(count_slots(t(9, 0), t(9, 0)).is_err());
    }

    #[test]
    fn count_always_matches_generated_length() {
        let cases = [
            (t(9, 0), t(10, 0)),
            (t(9, 0), t(10, 15)),
            (t(0, 0), t(23, 59)),
            (t(8, 15), t(8, 45)),
            (t(23, 30), t(23, 59)),
        ];
        for (start, end) in cases {
            let generated = generate_slots(start, end).unwrap();
            assert_eq!(
                count_slots(start, end).unwrap(),
                generated.len(),
                "count mismatch for {start}..{end}"
            );
        }
    }

    #[test]
    fn output_is_strictly_ascending() {
        let slots = generate_slots(t(0, 0), t(23, 59)).unwrap();
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn stops_at_midnight_without_wrapping() {
        let slots = generate_slots(t(23, 0), t(23, 59)).unwrap();
        assert_eq!(hhmm(&slots), vec!["23:00", "23:30"]);
    }
}
