//! Session command and query handlers.
//!
//! The write path is split into three stages that share one transaction:
//! `OwnershipValidator` filters referenced ids, `RelationReconciler` rebuilds
//! link rows, and `AttendanceDeriver` records visits on creation.

mod attendance_deriver;
mod create_session;
mod delete_session;
mod get_session;
mod hydration;
mod list_sessions;
mod ownership_validator;
mod relation_reconciler;
mod update_session;

pub use attendance_deriver::AttendanceDeriver;
pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use delete_session::{DeleteSessionCommand, DeleteSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use hydration::{assemble, SessionHydrator};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery};
pub use ownership_validator::OwnershipValidator;
pub use relation_reconciler::{ReconcileOutcome, RelationReconciler};
pub use update_session::{UpdateSessionCommand, UpdateSessionHandler};
