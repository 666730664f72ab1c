//! Table-shaped state shared by the in-memory adapters.

use crate::domain::attendance::{AttendanceRecord, NewAttendance};
use crate::domain::foundation::{
    AttendanceId, DomainError, ErrorCode, OwnedByTenant, PatronId, SessionId, StaffId, TenantId,
    Timestamp,
};
use crate::domain::session::{PatronLink, Session, StaffLink};

/// A write the in-memory store can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    InsertSession,
    InsertPatronLink,
    InsertStaffLink,
    InsertAttendance,
    Commit,
}

#[derive(Debug, Clone)]
pub(super) struct DirectoryRow {
    pub id: i64,
    pub tenant_id: TenantId,
    pub name: String,
    pub photo_url: Option<String>,
    pub deleted: bool,
}

impl DirectoryRow {
    pub fn visible_to(&self, tenant: TenantId, id: i64) -> bool {
        self.id == id && self.tenant_id == tenant && !self.deleted
    }
}

#[derive(Debug, Clone)]
pub(super) struct SessionRow {
    pub session: Session,
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub(super) struct AttendanceRow {
    pub record: AttendanceRecord,
    pub deleted: bool,
}

#[derive(Debug, Clone, Default)]
pub(super) struct MemoryState {
    next_id: i64,
    pub patrons: Vec<DirectoryRow>,
    pub staff: Vec<DirectoryRow>,
    pub sessions: Vec<SessionRow>,
    pub patron_links: Vec<PatronLink>,
    pub staff_links: Vec<StaffLink>,
    pub attendance: Vec<AttendanceRow>,
    pub fail_on: Option<FailPoint>,
}

impl MemoryState {
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn check(&self, point: FailPoint) -> Result<(), DomainError> {
        if self.fail_on == Some(point) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Simulated failure at {:?}", point),
            ));
        }
        Ok(())
    }

    pub fn live_session(&self, tenant: TenantId, id: SessionId) -> Option<&SessionRow> {
        self.sessions
            .iter()
            .find(|row| !row.deleted && row.session.id() == id && row.session.is_owned_by(tenant))
    }

    pub fn patron_visible(&self, tenant: TenantId, id: PatronId) -> bool {
        self.patrons
            .iter()
            .any(|row| row.visible_to(tenant, id.as_i64()))
    }

    pub fn staff_visible(&self, tenant: TenantId, id: StaffId) -> bool {
        self.staff.iter().any(|row| row.visible_to(tenant, id.as_i64()))
    }

    /// Inserts unless a live record shares (tenant, patron, day).
    pub fn insert_attendance(
        &mut self,
        new: &NewAttendance,
        now: Timestamp,
    ) -> Option<AttendanceRecord> {
        let day = new.bucket.day();
        let taken = self.attendance.iter().any(|row| {
            !row.deleted
                && row.record.tenant_id == new.tenant_id
                && row.record.patron_id == new.patron_id
                && row.record.visit_day == day
        });
        if taken {
            return None;
        }
        let id = AttendanceId::new(self.next_id());
        let record = AttendanceRecord::from_new(id, *new, now);
        self.attendance.push(AttendanceRow {
            record: record.clone(),
            deleted: false,
        });
        Some(record)
    }
}
