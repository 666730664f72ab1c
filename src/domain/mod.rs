//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `session` - Venue bookings, their links and sparse updates
//! - `attendance` - Day-bucketed attendance records derived from sessions

pub mod attendance;
pub mod foundation;
pub mod session;
