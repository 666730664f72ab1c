//! Attendance query handlers.

mod list_attendance;

pub use list_attendance::{ListAttendanceHandler, ListAttendanceQuery};
