//! Common validation rules shared across request payloads.

use chrono::NaiveDate;
use validator::ValidationError;

use crate::models::schedule::{CreateSchedulePayload, TimeRange};

/// Validates username format.
///
/// Requirements:
/// - Only alphanumeric characters and underscores
/// - 1-50 characters in length
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() || username.len() > 50 {
        return Err(ValidationError::new("username_invalid_length"));
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("username_invalid_characters"));
    }

    Ok(())
}

/// Passwords must be at least 8 characters.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }
    Ok(())
}

/// Every time range must end strictly after it starts.
pub fn validate_time_ranges(ranges: &[TimeRange]) -> Result<(), ValidationError> {
    if ranges.is_empty() {
        return Err(ValidationError::new("time_ranges_empty"));
    }
    if ranges.iter().any(|range| range.start >= range.end) {
        return Err(ValidationError::new("time_range_inverted"));
    }
    Ok(())
}

/// Weekday identifiers run Sunday = 0 through Saturday = 6.
pub fn validate_day_ids(day_ids: &[u8]) -> Result<(), ValidationError> {
    if day_ids.is_empty() {
        return Err(ValidationError::new("day_ids_empty"));
    }
    if day_ids.iter().any(|day| *day > 6) {
        return Err(ValidationError::new("day_id_out_of_range"));
    }
    Ok(())
}

/// When both bounds are present the window must not be inverted.
pub fn validate_validity_window(
    valid_from: Option<NaiveDate>,
    valid_to: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    if let (Some(from), Some(to)) = (valid_from, valid_to) {
        if to < from {
            return Err(ValidationError::new("validity_window_inverted"));
        }
    }
    Ok(())
}

/// Runs every schedule-payload rule, collecting the failed rule codes.
pub fn validate_schedule_payload(payload: &CreateSchedulePayload) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for result in [
        validate_time_ranges(&payload.time_ranges),
        validate_day_ids(&payload.day_ids),
        validate_validity_window(payload.valid_from, payload.valid_to),
    ] {
        if let Err(e) = result {
            errors.push(e.code.to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
        TimeRange {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn username_rejects_empty() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn username_rejects_special_chars() {
        assert!(validate_username("user@name").is_err());
    }

    #[test]
    fn username_accepts_valid() {
        assert!(validate_username("valid_user123").is_ok());
    }

    #[test]
    fn password_strength_enforces_minimum_length() {
        assert!(validate_password_strength("short").is_err());
        assert!(validate_password_strength("longenough").is_ok());
    }

    #[test]
    fn time_ranges_reject_inverted_range() {
        assert!(validate_time_ranges(&[range((10, 0), (9, 0))]).is_err());
        assert!(validate_time_ranges(&[range((9, 0), (9, 0))]).is_err());
        assert!(validate_time_ranges(&[]).is_err());
        assert!(validate_time_ranges(&[range((9, 0), (12, 0))]).is_ok());
    }

    #[test]
    fn day_ids_must_be_within_week() {
        assert!(validate_day_ids(&[0, 6]).is_ok());
        assert!(validate_day_ids(&[7]).is_err());
        assert!(validate_day_ids(&[]).is_err());
    }

    #[test]
    fn validity_window_rejects_inverted_bounds() {
        let early = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let late = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert!(validate_validity_window(Some(late), Some(early)).is_err());
        assert!(validate_validity_window(Some(early), Some(late)).is_ok());
        assert!(validate_validity_window(None, Some(late)).is_ok());
    }

    #[test]
    fn schedule_payload_collects_all_failures() {
        let payload = CreateSchedulePayload {
            time_ranges: vec![range((10, 0), (9, 0))],
            day_ids: vec![9],
            valid_from: Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
            valid_to: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        };
        let errors = validate_schedule_payload(&payload).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&"time_range_inverted".to_string()));
        assert!(errors.contains(&"day_id_out_of_range".to_string()));
        assert!(errors.contains(&"validity_window_inverted".to_string()));
    }
}
