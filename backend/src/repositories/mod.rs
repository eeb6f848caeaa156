pub mod appointment;
pub mod chair;
pub mod refresh_token;
pub mod repository;
pub mod schedule;
pub mod user;
