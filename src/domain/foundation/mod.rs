//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Hostnote domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedTenant};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AttendanceId, PatronId, SessionId, StaffId, TenantId};
pub use ownership::OwnedByTenant;
pub use timestamp::Timestamp;
