use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::scheduling::slots::SLOT_DURATION_MINUTES;
use crate::types::{AppointmentId, ChairId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Appointment {
    #[schema(value_type = String)]
    pub id: AppointmentId,
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub chair_id: ChairId,
    pub datetime_start: DateTime<Utc>,
    pub datetime_end: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub presence_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Statuses that hold a slot: scheduled or confirmed bookings.
    pub fn occupies_slot(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        )
    }

    /// Cancelled and completed appointments admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }
}

impl Appointment {
    /// Creates a new scheduled appointment; the end time is fixed at one slot
    /// length after the start.
    pub fn new(
        user_id: UserId,
        chair_id: ChairId,
        datetime_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AppointmentId::new(),
            user_id,
            chair_id,
            datetime_start,
            datetime_end: datetime_start + Duration::minutes(SLOT_DURATION_MINUTES),
            status: AppointmentStatus::Scheduled,
            presence_confirmed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Status filter for appointment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    #[schema(value_type = String)]
    pub chair_id: ChairId,
    pub datetime_start: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    #[schema(value_type = String)]
    pub id: AppointmentId,
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub chair_id: ChairId,
    pub datetime_start: DateTime<Utc>,
    pub datetime_end: DateTime<Utc>,
    /// Effective status: confirmed appointments whose end time has passed
    /// read as completed.
    pub status: AppointmentStatus,
    pub presence_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl AppointmentResponse {
    pub fn from_appointment(appointment: Appointment, now: DateTime<Utc>) -> Self {
        let status = crate::scheduling::eligibility::effective_status(&appointment, now);
        Self {
            id: appointment.id,
            user_id: appointment.user_id,
            chair_id: appointment.chair_id,
            datetime_start: appointment.datetime_start,
            datetime_end: appointment.datetime_end,
            status,
            presence_confirmed: appointment.presence_confirmed,
            created_at: appointment.created_at,
        }
    }
}
