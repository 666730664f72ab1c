//! HTTP routes for attendance endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_attendance, AttendanceHandlers};

/// Attendance routes, mounted at `/visit`.
pub fn attendance_routes(handlers: AttendanceHandlers) -> Router {
    Router::new()
        .route("/", get(list_attendance))
        .with_state(handlers)
}
