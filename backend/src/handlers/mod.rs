pub mod appointments;
pub mod auth;
pub mod availability;
pub mod chairs;
pub mod schedules;
pub mod users;
