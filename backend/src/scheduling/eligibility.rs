//! Booking-eligibility predicates and the appointment state machine.
//!
//! Pure checks the handlers run before mutating anything; the database is
//! still the authority (the unique slot index catches races these checks
//! cannot see).

use chrono::{DateTime, Duration, Utc};

use crate::models::appointment::{Appointment, AppointmentStatus};

/// Minimum interval between "now" and an appointment's start for a user to
/// cancel it.
pub const CANCELLATION_LEAD_TIME_HOURS: i64 = 3;

pub fn cancellation_lead_time() -> Duration {
    Duration::hours(CANCELLATION_LEAD_TIME_HOURS)
}

/// Why a new booking was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingDenial {
    /// The user already holds a scheduled appointment.
    ScheduledExists,
    /// The user already holds a confirmed appointment that has not started.
    ConfirmedUpcoming,
}

impl BookingDenial {
    pub fn message(&self) -> &'static str {
        match self {
            BookingDenial::ScheduledExists => "You already have a scheduled appointment",
            BookingDenial::ConfirmedUpcoming => {
                "You already have a confirmed upcoming appointment"
            }
        }
    }
}

/// Outcome of a `can_create` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingDecision {
    pub allowed: bool,
    pub reason: Option<BookingDenial>,
}

impl BookingDecision {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn denied(reason: BookingDenial) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// A user may hold at most one active appointment: any scheduled one, or a
/// confirmed one whose start time is now or later. Confirmed appointments
/// that already started (or finished) do not block a new booking.
pub fn can_create(existing: &[Appointment], now: DateTime<Utc>) -> BookingDecision {
    for appointment in existing {
        match appointment.status {
            AppointmentStatus::Scheduled => {
                return BookingDecision::denied(BookingDenial::ScheduledExists);
            }
            AppointmentStatus::Confirmed if appointment.datetime_start >= now => {
                return BookingDecision::denied(BookingDenial::ConfirmedUpcoming);
            }
            _ => {}
        }
    }
    BookingDecision::allowed()
}

/// Why a cancellation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelDenial {
    /// Only scheduled appointments can be cancelled by their owner.
    WrongStatus(AppointmentStatus),
    /// The appointment starts in less than the required lead time.
    InsideLeadTime,
}

impl CancelDenial {
    pub fn message(&self) -> String {
        match self {
            CancelDenial::WrongStatus(status) => {
                format!("A {} appointment cannot be cancelled", status.as_str())
            }
            CancelDenial::InsideLeadTime => format!(
                "Appointments can only be cancelled at least {} hours before they start",
                CANCELLATION_LEAD_TIME_HOURS
            ),
        }
    }
}

/// Cancellation rule: scheduled status and at least the lead time remaining
/// before the start.
pub fn check_cancel(appointment: &Appointment, now: DateTime<Utc>) -> Result<(), CancelDenial> {
    if appointment.status != AppointmentStatus::Scheduled {
        return Err(CancelDenial::WrongStatus(appointment.status));
    }
    if appointment.datetime_start - now < cancellation_lead_time() {
        return Err(CancelDenial::InsideLeadTime);
    }
    Ok(())
}

pub fn can_cancel(appointment: &Appointment, now: DateTime<Utc>) -> bool {
    check_cancel(appointment, now).is_ok()
}

/// Confirmation is only a transition out of the scheduled state.
pub fn can_confirm(appointment: &Appointment) -> bool {
    appointment.status == AppointmentStatus::Scheduled
}

/// Effective status for presentation: a confirmed appointment whose end time
/// has passed reads as completed. Nothing is persisted.
pub fn effective_status(appointment: &Appointment, now: DateTime<Utc>) -> AppointmentStatus {
    if appointment.status == AppointmentStatus::Confirmed && appointment.datetime_end < now {
        AppointmentStatus::Completed
    } else {
        appointment.status
    }
}
