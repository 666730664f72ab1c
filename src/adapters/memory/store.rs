//! In-memory implementation of every persistence port.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::state::{DirectoryRow, FailPoint, MemoryState};
use super::transaction::MemoryTransaction;
use crate::domain::attendance::AttendanceRecord;
use crate::domain::foundation::{DomainError, OwnedByTenant, PatronId, SessionId, StaffId, TenantId};
use crate::domain::session::{PatronLink, Session, StaffLink};
use crate::ports::{
    AttendanceReader, DirectoryReader, ListOptions, PatronSummary, SessionReader, SessionStore,
    SessionTransaction, StaffSummary,
};

/// In-memory store for tests and local runs.
///
/// Features:
/// - Staged transactions (commit applies, drop rolls back)
/// - Attendance uniqueness on (tenant, patron, day) like the database index
/// - Failure injection at named write points
///
/// Transactions are serialized: one holds the state lock until it commits or
/// is dropped. Reads issued while a transaction is open wait for it.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryStore::new();
/// let patron = store.add_patron(TenantId::new(1), "Aoi", None).await;
///
/// let mut tx = store.begin().await?;
/// assert!(tx.patron_exists(TenantId::new(1), patron).await?);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    pub async fn add_patron(
        &self,
        tenant: TenantId,
        name: &str,
        photo_url: Option<&str>,
    ) -> PatronId {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.patrons.push(directory_row(id, tenant, name, photo_url));
        PatronId::new(id)
    }

    pub async fn add_staff(&self, tenant: TenantId, name: &str, photo_url: Option<&str>) -> StaffId {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        state.staff.push(directory_row(id, tenant, name, photo_url));
        StaffId::new(id)
    }

    pub async fn delete_patron(&self, id: PatronId) {
        let mut state = self.state.lock().await;
        for row in state.patrons.iter_mut().filter(|r| r.id == id.as_i64()) {
            row.deleted = true;
        }
    }

    pub async fn delete_staff(&self, id: StaffId) {
        let mut state = self.state.lock().await;
        for row in state.staff.iter_mut().filter(|r| r.id == id.as_i64()) {
            row.deleted = true;
        }
    }

    /// Makes every write at `point` fail until cleared with `None`.
    pub async fn fail_on(&self, point: Option<FailPoint>) {
        self.state.lock().await.fail_on = point;
    }

    /// Every stored session, including soft-deleted ones.
    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    pub async fn patron_links(&self, session: SessionId) -> Vec<PatronLink> {
        let state = self.state.lock().await;
        state
            .patron_links
            .iter()
            .filter(|l| l.session_id == session)
            .copied()
            .collect()
    }

    pub async fn staff_links(&self, session: SessionId) -> Vec<StaffLink> {
        let state = self.state.lock().await;
        state
            .staff_links
            .iter()
            .filter(|l| l.session_id == session)
            .copied()
            .collect()
    }

    /// Every stored attendance record in insertion order.
    pub async fn attendance_records(&self) -> Vec<AttendanceRecord> {
        let state = self.state.lock().await;
        state.attendance.iter().map(|row| row.record.clone()).collect()
    }
}

fn directory_row(id: i64, tenant: TenantId, name: &str, photo_url: Option<&str>) -> DirectoryRow {
    DirectoryRow {
        id,
        tenant_id: tenant,
        name: name.to_string(),
        photo_url: photo_url.map(str::to_string),
        deleted: false,
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn SessionTransaction>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        Ok(Box::new(MemoryTransaction::new(guard)))
    }
}

#[async_trait]
impl SessionReader for InMemoryStore {
    async fn find_session(
        &self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<Option<Session>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.live_session(tenant, id).map(|row| row.session.clone()))
    }

    async fn list_sessions(
        &self,
        tenant: TenantId,
        options: &ListOptions,
    ) -> Result<Vec<Session>, DomainError> {
        let state = self.state.lock().await;
        let mut sessions: Vec<Session> = state
            .sessions
            .iter()
            .filter(|row| !row.deleted && row.session.is_owned_by(tenant))
            .map(|row| row.session.clone())
            .collect();
        sessions.sort_by(|a, b| {
            b.datetime()
                .cmp(a.datetime())
                .then_with(|| b.id().as_i64().cmp(&a.id().as_i64()))
        });
        Ok(sessions
            .into_iter()
            .skip(options.offset as usize)
            .take(options.limit as usize)
            .collect())
    }

    async fn patron_links_for(
        &self,
        sessions: &[SessionId],
    ) -> Result<Vec<PatronLink>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .patron_links
            .iter()
            .filter(|l| sessions.contains(&l.session_id))
            .copied()
            .collect())
    }

    async fn staff_links_for(&self, sessions: &[SessionId]) -> Result<Vec<StaffLink>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .staff_links
            .iter()
            .filter(|l| sessions.contains(&l.session_id))
            .copied()
            .collect())
    }
}

#[async_trait]
impl DirectoryReader for InMemoryStore {
    async fn patron_summaries(
        &self,
        tenant: TenantId,
        ids: &[PatronId],
    ) -> Result<Vec<PatronSummary>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .patrons
            .iter()
            .filter(|row| ids.iter().any(|id| row.visible_to(tenant, id.as_i64())))
            .map(|row| PatronSummary {
                id: PatronId::new(row.id),
                name: row.name.clone(),
                photo_url: row.photo_url.clone(),
            })
            .collect())
    }

    async fn staff_summaries(
        &self,
        tenant: TenantId,
        ids: &[StaffId],
    ) -> Result<Vec<StaffSummary>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .staff
            .iter()
            .filter(|row| ids.iter().any(|id| row.visible_to(tenant, id.as_i64())))
            .map(|row| StaffSummary {
                id: StaffId::new(row.id),
                name: row.name.clone(),
                photo_url: row.photo_url.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl AttendanceReader for InMemoryStore {
    async fn list_attendance(
        &self,
        tenant: TenantId,
        patron: Option<PatronId>,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        let state = self.state.lock().await;
        let mut records: Vec<AttendanceRecord> = state
            .attendance
            .iter()
            .filter(|row| !row.deleted && row.record.is_owned_by(tenant))
            .filter(|row| patron.map_or(true, |p| row.record.patron_id == p))
            .map(|row| row.record.clone())
            .collect();
        records.sort_by(|a, b| b.visit_date.cmp(&a.visit_date));
        Ok(records)
    }
}
