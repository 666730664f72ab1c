//! Attendance domain module.
//!
//! Attendance records are derived from session patron links: one record per
//! (tenant, patron, local calendar day). They are created once and never
//! rewritten by the session write path.

mod day_bucket;
mod record;

pub use day_bucket::DayBucket;
pub use record::{AttendanceRecord, NewAttendance};
