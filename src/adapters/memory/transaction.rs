//! Staged in-memory transaction.
//!
//! The transaction holds the state lock for its whole lifetime and writes to
//! a private copy. `commit` swaps the copy in; dropping discards it.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::state::{FailPoint, MemoryState, SessionRow};
use crate::domain::attendance::{AttendanceRecord, DayBucket, NewAttendance};
use crate::domain::foundation::{
    DomainError, OwnedByTenant, PatronId, SessionId, StaffId, TenantId, Timestamp,
};
use crate::domain::session::{NewSession, PatronLink, Session, StaffLink, StaffRole};
use crate::ports::{OwnershipLookup, SessionTransaction};

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

impl MemoryTransaction {
    pub(super) fn new(guard: OwnedMutexGuard<MemoryState>) -> Self {
        let staged = guard.clone();
        Self { guard, staged }
    }
}

#[async_trait]
impl OwnershipLookup for MemoryTransaction {
    async fn patron_exists(
        &mut self,
        tenant: TenantId,
        patron: PatronId,
    ) -> Result<bool, DomainError> {
        Ok(self.staged.patron_visible(tenant, patron))
    }

    async fn staff_exists(&mut self, tenant: TenantId, staff: StaffId) -> Result<bool, DomainError> {
        Ok(self.staged.staff_visible(tenant, staff))
    }
}

#[async_trait]
impl SessionTransaction for MemoryTransaction {
    async fn insert_session(&mut self, new: &NewSession) -> Result<Session, DomainError> {
        self.staged.check(FailPoint::InsertSession)?;
        let id = SessionId::new(self.staged.next_id());
        let session = Session::from_new(id, new.clone(), Timestamp::now());
        self.staged.sessions.push(SessionRow {
            session: session.clone(),
            deleted: false,
        });
        Ok(session)
    }

    async fn lock_session(
        &mut self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<Option<Session>, DomainError> {
        Ok(self
            .staged
            .live_session(tenant, id)
            .map(|row| row.session.clone()))
    }

    async fn update_session(&mut self, session: &Session) -> Result<(), DomainError> {
        if let Some(row) = self.staged.sessions.iter_mut().find(|row| {
            !row.deleted
                && row.session.id() == session.id()
                && row.session.is_owned_by(session.tenant_id())
        }) {
            row.session = session.clone();
        }
        Ok(())
    }

    async fn soft_delete_session(
        &mut self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<bool, DomainError> {
        match self.staged.sessions.iter_mut().find(|row| {
            !row.deleted && row.session.id() == id && row.session.is_owned_by(tenant)
        }) {
            Some(row) => {
                row.deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear_patron_links(&mut self, session: SessionId) -> Result<(), DomainError> {
        self.staged
            .patron_links
            .retain(|link| link.session_id != session);
        Ok(())
    }

    async fn insert_patron_link(&mut self, link: PatronLink) -> Result<(), DomainError> {
        self.staged.check(FailPoint::InsertPatronLink)?;
        self.staged.patron_links.push(link);
        Ok(())
    }

    async fn clear_staff_links(
        &mut self,
        session: SessionId,
        role: StaffRole,
    ) -> Result<(), DomainError> {
        self.staged
            .staff_links
            .retain(|link| !(link.session_id == session && link.role == role));
        Ok(())
    }

    async fn insert_staff_link(&mut self, link: StaffLink) -> Result<(), DomainError> {
        self.staged.check(FailPoint::InsertStaffLink)?;
        self.staged.staff_links.push(link);
        Ok(())
    }

    async fn attendance_exists(
        &mut self,
        tenant: TenantId,
        patron: PatronId,
        bucket: &DayBucket,
    ) -> Result<bool, DomainError> {
        Ok(self
            .staged
            .attendance
            .iter()
            .any(|row| !row.deleted && row.record.covers(tenant, patron, bucket)))
    }

    async fn insert_attendance(
        &mut self,
        new: &NewAttendance,
    ) -> Result<Option<AttendanceRecord>, DomainError> {
        self.staged.check(FailPoint::InsertAttendance)?;
        Ok(self.staged.insert_attendance(new, Timestamp::now()))
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let MemoryTransaction { mut guard, staged } = *self;
        staged.check(FailPoint::Commit)?;
        *guard = staged;
        Ok(())
    }
}
