//! Session domain module.
//!
//! A session is a recorded venue booking: when it happened, which table, an
//! optional note and sales breakdown, plus the patrons and staff linked to it.

mod aggregate;
mod datetime;
mod errors;
mod links;
mod patch;
mod sales;

pub use aggregate::{NewSession, Session};
pub use datetime::parse_session_datetime;
pub use errors::SessionError;
pub use links::{LinkPlan, PatronLink, StaffLink, StaffRole};
pub use patch::{FieldUpdate, SessionPatch};
pub use sales::{OrderItem, SalesInfo, VisitType};
