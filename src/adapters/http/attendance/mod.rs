//! HTTP adapter for attendance history.

mod dto;
mod handlers;
mod routes;

pub use dto::{AttendanceResponse, ListAttendanceParams};
pub use handlers::AttendanceHandlers;
pub use routes::attendance_routes;
