//! PostgreSQL adapters - Database implementations for the persistence ports.
//!
//! - `PostgresSessionStore` - Transactional session writes
//! - `PostgresSessionReader` - Session rows and batched link queries
//! - `PostgresDirectoryReader` - Tenant-scoped patron and staff summaries
//! - `PostgresAttendanceReader` - Attendance history

mod attendance_reader;
mod directory_reader;
mod rows;
mod session_reader;
mod session_store;

pub use attendance_reader::PostgresAttendanceReader;
pub use directory_reader::PostgresDirectoryReader;
pub use session_reader::PostgresSessionReader;
pub use session_store::{PostgresSessionStore, PostgresSessionTransaction};
