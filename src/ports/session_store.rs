//! Session store port (write side).
//!
//! Every session write runs inside one [`SessionTransaction`]: the base row,
//! link reconciliation and attendance derivation either all commit or none
//! do. Dropping a transaction without calling [`SessionTransaction::commit`]
//! rolls it back.
//!
//! # Design
//!
//! - **Unit of work**: callers open a transaction with [`SessionStore::begin`]
//!   and pass it through the write-path stages
//! - **Tenant-scoped**: every lookup takes the acting tenant explicitly
//! - **Create-once attendance**: `insert_attendance` reports a uniqueness
//!   conflict as `None`, never as an error

use async_trait::async_trait;

use crate::domain::attendance::{AttendanceRecord, DayBucket, NewAttendance};
use crate::domain::foundation::{DomainError, PatronId, SessionId, StaffId, TenantId};
use crate::domain::session::{NewSession, PatronLink, Session, StaffLink, StaffRole};

/// Tenant-ownership lookups for referenced entities.
///
/// Only live (not soft-deleted) rows count as owned.
#[async_trait]
pub trait OwnershipLookup: Send {
    /// True if a live patron with this id belongs to `tenant`.
    async fn patron_exists(&mut self, tenant: TenantId, patron: PatronId)
        -> Result<bool, DomainError>;

    /// True if a live staff member with this id belongs to `tenant`.
    async fn staff_exists(&mut self, tenant: TenantId, staff: StaffId) -> Result<bool, DomainError>;
}

/// An open write transaction.
#[async_trait]
pub trait SessionTransaction: OwnershipLookup {
    /// Insert a session base row and return it with its assigned id.
    async fn insert_session(&mut self, new: &NewSession) -> Result<Session, DomainError>;

    /// Load a live session owned by `tenant` and lock it until commit.
    ///
    /// Returns `None` if the session is absent, foreign, or soft-deleted.
    async fn lock_session(
        &mut self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<Option<Session>, DomainError>;

    /// Persist the base columns of a session loaded with `lock_session`.
    async fn update_session(&mut self, session: &Session) -> Result<(), DomainError>;

    /// Mark a live session owned by `tenant` as deleted.
    ///
    /// Returns `false` if there was no such session. Link rows and attendance
    /// records are left untouched.
    async fn soft_delete_session(
        &mut self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<bool, DomainError>;

    /// Remove every patron link of a session.
    async fn clear_patron_links(&mut self, session: SessionId) -> Result<(), DomainError>;

    async fn insert_patron_link(&mut self, link: PatronLink) -> Result<(), DomainError>;

    /// Remove every staff link of a session with the given role.
    async fn clear_staff_links(
        &mut self,
        session: SessionId,
        role: StaffRole,
    ) -> Result<(), DomainError>;

    async fn insert_staff_link(&mut self, link: StaffLink) -> Result<(), DomainError>;

    /// True if a live attendance record for (tenant, patron) falls inside `bucket`.
    async fn attendance_exists(
        &mut self,
        tenant: TenantId,
        patron: PatronId,
        bucket: &DayBucket,
    ) -> Result<bool, DomainError>;

    /// Insert an attendance record.
    ///
    /// Returns `None` when a live record for the same (tenant, patron, day)
    /// already exists, including one committed concurrently.
    async fn insert_attendance(
        &mut self,
        new: &NewAttendance,
    ) -> Result<Option<AttendanceRecord>, DomainError>;

    /// Make every write in this transaction durable.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

/// Opens write transactions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn SessionTransaction>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
        fn _accepts_tx(_tx: &mut dyn SessionTransaction) {}
    }

    #[test]
    fn transaction_is_send() {
        fn assert_send<T: Send + ?Sized>() {}
        assert_send::<Box<dyn SessionTransaction>>();
    }
}
