#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::{
        appointments::{AppointmentListQuery, AppointmentListResponse, MyAppointmentsQuery},
        availability::{AvailabilityListResponse, AvailabilityQuery, ChairAvailabilityEntry},
    },
    models::{
        appointment::{
            AppointmentResponse, AppointmentStatus, CreateAppointmentRequest, StatusFilter,
        },
        chair::{ChairResponse, ChairStatus, CreateChairPayload, UpdateChairPayload},
        schedule::{CreateSchedulePayload, ScheduleResponse, TimeRange},
        user::{CreateUser, LoginRequest, LoginResponse, RefreshRequest, UserResponse},
        PageInfo,
    },
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        login_doc,
        refresh_doc,
        me_doc,
        logout_doc,
        availability_doc,
        chairs_doc,
        create_appointment_doc,
        my_appointments_doc,
        cancel_appointment_doc,
        confirm_appointment_doc,
        list_appointments_doc,
        admin_list_chairs_doc,
        admin_create_chair_doc,
        admin_update_chair_doc,
        admin_delete_chair_doc,
        get_schedule_doc,
        create_schedule_doc,
        update_schedule_doc,
        delete_schedule_doc,
        admin_list_users_doc,
        admin_create_user_doc
    ),
    components(
        schemas(
            LoginRequest,
            RefreshRequest,
            LoginResponse,
            UserResponse,
            CreateUser,
            ChairResponse,
            ChairStatus,
            CreateChairPayload,
            UpdateChairPayload,
            TimeRange,
            CreateSchedulePayload,
            ScheduleResponse,
            CreateAppointmentRequest,
            AppointmentResponse,
            AppointmentStatus,
            StatusFilter,
            ChairAvailabilityEntry,
            AvailabilityListResponse,
            AppointmentListResponse,
            PageInfo
        )
    ),
    modifiers(&SecuritySchemes),
    tags(
        (name = "Auth", description = "Login, token refresh, session"),
        (name = "Availability", description = "Per-chair bookable slots"),
        (name = "Appointments", description = "Booking, cancellation, confirmation"),
        (name = "Admin", description = "Chair, schedule, and user management")
    ),
    security(("BearerAuth" = []))
)]
pub struct ApiDoc;

struct SecuritySchemes;

impl Modify for SecuritySchemes {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();

        let mut bearer = Http::new(HttpAuthScheme::Bearer);
        bearer.bearer_format = Some("JWT".to_string());

        components.add_security_scheme("BearerAuth", SecurityScheme::Http(bearer));
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth",
    security(())
)]
fn login_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses((status = 200, description = "Tokens rotated", body = LoginResponse)),
    tag = "Auth",
    security(())
)]
fn refresh_doc() {}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses((status = 200, description = "The authenticated user", body = UserResponse)),
    tag = "Auth"
)]
fn me_doc() {}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = RefreshRequest,
    responses((status = 200, description = "Refresh token revoked", body = serde_json::Value)),
    tag = "Auth"
)]
fn logout_doc() {}

#[utoipa::path(
    get,
    path = "/api/availability",
    params(AvailabilityQuery),
    responses((status = 200, body = AvailabilityListResponse)),
    tag = "Availability"
)]
fn availability_doc() {}

#[utoipa::path(
    get,
    path = "/api/chairs",
    responses((status = 200, description = "Bookable chairs", body = [ChairResponse])),
    tag = "Availability"
)]
fn chairs_doc() {}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, body = AppointmentResponse),
        (status = 409, description = "Slot already booked"),
        (status = 422, description = "Booking not allowed")
    ),
    tag = "Appointments"
)]
fn create_appointment_doc() {}

#[utoipa::path(
    get,
    path = "/api/appointments/me",
    params(MyAppointmentsQuery),
    responses((status = 200, body = [AppointmentResponse])),
    tag = "Appointments"
)]
fn my_appointments_doc() {}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, body = AppointmentResponse),
        (status = 422, description = "Cancellation not allowed")
    ),
    tag = "Appointments"
)]
fn cancel_appointment_doc() {}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}/confirm",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, body = AppointmentResponse),
        (status = 422, description = "Confirmation not allowed")
    ),
    tag = "Appointments"
)]
fn confirm_appointment_doc() {}

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(AppointmentListQuery),
    responses((status = 200, body = AppointmentListResponse)),
    tag = "Appointments"
)]
fn list_appointments_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/chairs",
    responses((status = 200, body = [ChairResponse])),
    tag = "Admin"
)]
fn admin_list_chairs_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/chairs",
    request_body = CreateChairPayload,
    responses((status = 201, body = ChairResponse)),
    tag = "Admin"
)]
fn admin_create_chair_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/chairs/{id}",
    params(("id" = String, Path, description = "Chair id")),
    request_body = UpdateChairPayload,
    responses((status = 200, body = ChairResponse)),
    tag = "Admin"
)]
fn admin_update_chair_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/chairs/{id}",
    params(("id" = String, Path, description = "Chair id")),
    responses(
        (status = 204, description = "Chair deleted"),
        (status = 409, description = "Chair has appointments")
    ),
    tag = "Admin"
)]
fn admin_delete_chair_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/schedule",
    responses((status = 200, description = "The current schedule, or null when none exists", body = ScheduleResponse)),
    tag = "Admin"
)]
fn get_schedule_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/schedule",
    request_body = CreateSchedulePayload,
    responses(
        (status = 201, body = ScheduleResponse),
        (status = 409, description = "A schedule already exists")
    ),
    tag = "Admin"
)]
fn create_schedule_doc() {}

#[utoipa::path(
    put,
    path = "/api/admin/schedule/{id}",
    params(("id" = String, Path, description = "Schedule id")),
    request_body = CreateSchedulePayload,
    responses((status = 200, body = ScheduleResponse)),
    tag = "Admin"
)]
fn update_schedule_doc() {}

#[utoipa::path(
    delete,
    path = "/api/admin/schedule/{id}",
    params(("id" = String, Path, description = "Schedule id")),
    responses((status = 204, description = "Schedule deleted")),
    tag = "Admin"
)]
fn delete_schedule_doc() {}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses((status = 200, body = [UserResponse])),
    tag = "Admin"
)]
fn admin_list_users_doc() {}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUser,
    responses((status = 201, body = UserResponse)),
    tag = "Admin"
)]
fn admin_create_user_doc() {}
