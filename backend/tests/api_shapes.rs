//! Wire-format checks for the JSON contract: camelCase keys, `HH:MM` slot
//! times, ISO-8601 timestamps.

use chrono::{NaiveTime, TimeZone, Utc};
use vibeseat_backend::handlers::availability::{AvailabilityListResponse, ChairAvailabilityEntry};
use vibeseat_backend::models::appointment::{
    Appointment, AppointmentResponse, CreateAppointmentRequest,
};
use vibeseat_backend::models::schedule::{CreateSchedulePayload, TimeRange};
use vibeseat_backend::models::user::{LoginResponse, UserResponse};
use vibeseat_backend::models::PageInfo;
use vibeseat_backend::types::{ChairId, UserId};

#[test]
fn chair_availability_entry_uses_camel_case_and_hhmm() {
    let entry = ChairAvailabilityEntry {
        chair_id: ChairId::new(),
        chair_name: "Lobby 1".into(),
        chair_location: Some("HQ 3F".into()),
        available: vec!["08:00".into()],
        unavailable: vec!["08:30".into()],
        total_slots: 2,
        booked_slots: 1,
        available_slots: 1,
    };
    let json = serde_json::to_value(&entry).unwrap();

    assert!(json.get("chairId").is_some());
    assert!(json.get("chairName").is_some());
    assert!(json.get("chairLocation").is_some());
    assert_eq!(json["available"][0], "08:00");
    assert_eq!(json["unavailable"][0], "08:30");
    assert_eq!(json["totalSlots"], 2);
    assert_eq!(json["bookedSlots"], 1);
    assert_eq!(json["availableSlots"], 1);
    // No snake_case leakage.
    assert!(json.get("chair_id").is_none());
    assert!(json.get("total_slots").is_none());
}

#[test]
fn availability_response_includes_pagination_metadata() {
    let response = AvailabilityListResponse {
        date: chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        chairs: vec![],
        pagination: PageInfo::new(2, 5, 12),
    };
    let json = serde_json::to_value(&response).unwrap();

    let pagination = &json["pagination"];
    assert_eq!(pagination["currentPage"], 2);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(pagination["totalItems"], 12);
    assert_eq!(pagination["itemsPerPage"], 5);
    assert_eq!(pagination["hasNextPage"], true);
    assert_eq!(pagination["hasPrevPage"], true);
    assert_eq!(pagination["nextPage"], 3);
    assert_eq!(pagination["prevPage"], 1);
    assert_eq!(pagination["lastPage"], 3);
}

#[test]
fn create_appointment_request_accepts_camel_case() {
    let chair_id = ChairId::new();
    let raw = format!(
        r#"{{"chairId": "{chair_id}", "datetimeStart": "2025-01-06T08:30:00Z"}}"#
    );
    let request: CreateAppointmentRequest = serde_json::from_str(&raw).unwrap();
    assert_eq!(request.chair_id, chair_id);
    assert_eq!(
        request.datetime_start,
        Utc.with_ymd_and_hms(2025, 1, 6, 8, 30, 0).unwrap()
    );
}

#[test]
fn appointment_response_serializes_camel_case_timestamps() {
    let start = Utc.with_ymd_and_hms(2025, 1, 6, 8, 30, 0).unwrap();
    let appointment = Appointment::new(UserId::new(), ChairId::new(), start, start);
    let response = AppointmentResponse::from_appointment(appointment, start);
    let json = serde_json::to_value(&response).unwrap();

    assert!(json.get("datetimeStart").is_some());
    assert!(json.get("datetimeEnd").is_some());
    assert!(json.get("presenceConfirmed").is_some());
    assert_eq!(json["status"], "scheduled");
    assert!(json["datetimeStart"]
        .as_str()
        .unwrap()
        .starts_with("2025-01-06T08:30:00"));
}

#[test]
fn schedule_payload_round_trips_hhmm_ranges() {
    let raw = r#"{
        "timeRanges": [{"start": "08:00", "end": "12:00"}, {"start": "13:00", "end": "17:30"}],
        "dayIds": [1, 3, 5],
        "validFrom": "2025-01-10",
        "validTo": "2025-01-31"
    }"#;
    let payload: CreateSchedulePayload = serde_json::from_str(raw).unwrap();

    assert_eq!(payload.time_ranges.len(), 2);
    assert_eq!(
        payload.time_ranges[0],
        TimeRange {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        }
    );
    assert_eq!(payload.day_ids, vec![1, 3, 5]);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["timeRanges"][1]["end"], "17:30");
    assert_eq!(json["validFrom"], "2025-01-10");
}

#[test]
fn login_response_uses_camel_case_token_keys() {
    let user = vibeseat_backend::models::user::User::new(
        "alice".into(),
        "hash".into(),
        "Alice".into(),
        vibeseat_backend::models::user::UserRole::User,
    );
    let response = LoginResponse {
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        user: UserResponse::from(user),
    };
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["accessToken"], "access");
    assert_eq!(json["refreshToken"], "refresh");
    assert_eq!(json["user"]["role"], "user");
    assert!(json["user"].get("fullName").is_some());
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("passwordHash").is_none());
}
