//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Write Ports
//!
//! - `SessionStore` - Opens transactions for the session write path
//! - `SessionTransaction` - Session, link and attendance writes in one unit
//! - `OwnershipLookup` - Tenant-ownership checks for referenced entities
//!
//! ## Read Ports
//!
//! - `SessionReader` - Session rows and their links, batched by session
//! - `DirectoryReader` - Tenant-scoped patron and staff summaries
//! - `AttendanceReader` - Attendance history
//!
//! ## Identity
//!
//! - `IdentityValidator` - Bearer token to acting tenant

mod attendance_reader;
mod directory_reader;
mod identity_validator;
mod session_reader;
mod session_store;

pub use attendance_reader::{AttendanceReader, AttendanceView};
pub use directory_reader::{DirectoryReader, PatronSummary, StaffSummary};
pub use identity_validator::IdentityValidator;
pub use session_reader::{ListOptions, SessionReader, SessionView};
pub use session_store::{OwnershipLookup, SessionStore, SessionTransaction};
