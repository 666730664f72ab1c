//! CreateSessionHandler - Command handler for recording new sessions.

use std::sync::Arc;

use super::attendance_deriver::AttendanceDeriver;
use super::hydration::SessionHydrator;
use super::ownership_validator::OwnershipValidator;
use super::relation_reconciler::RelationReconciler;
use crate::domain::attendance::AttendanceRecord;
use crate::domain::foundation::{PatronId, StaffId, TenantId};
use crate::domain::session::{
    parse_session_datetime, LinkPlan, NewSession, SalesInfo, SessionError,
};
use crate::ports::{SessionStore, SessionTransaction, SessionView};

/// Command to record a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub tenant_id: TenantId,
    /// Raw client date-time. Required.
    pub datetime: Option<String>,
    pub table_number: Option<String>,
    pub memo: Option<String>,
    /// Raw sales document, validated by the handler.
    pub sales_info: Option<serde_json::Value>,
    pub patron_ids: Vec<PatronId>,
    pub primary_staff_id: Option<StaffId>,
    pub support_staff_ids: Vec<StaffId>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub view: SessionView,
    /// Attendance records inserted by this creation.
    pub attendance: Vec<AttendanceRecord>,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
    hydrator: Arc<SessionHydrator>,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, hydrator: Arc<SessionHydrator>) -> Self {
        Self { store, hydrator }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<CreateSessionResult, SessionError> {
        // 1. Validate input before opening a transaction
        let datetime = parse_session_datetime(cmd.datetime.as_deref().unwrap_or_default())?;
        let sales_info = cmd.sales_info.map(SalesInfo::from_json).transpose()?;
        let new = NewSession::new(cmd.tenant_id, datetime, cmd.table_number, cmd.memo, sales_info);
        let plan = LinkPlan::replace_all(
            cmd.patron_ids,
            cmd.primary_staff_id,
            cmd.support_staff_ids,
        );

        // 2. Base row, links and attendance in one transaction
        let mut tx = self.store.begin().await?;
        let session = tx.insert_session(&new).await?;

        let validator = OwnershipValidator::new(cmd.tenant_id);
        let outcome = RelationReconciler::new(validator)
            .reconcile(&mut *tx, session.id(), &plan)
            .await?;
        let attendance = AttendanceDeriver::new(cmd.tenant_id)
            .derive(&mut *tx, *session.datetime(), outcome.accepted_patrons())
            .await?;

        tx.commit().await?;

        tracing::info!(
            tenant_id = %cmd.tenant_id,
            session_id = %session.id(),
            patrons = outcome.accepted_patrons().len(),
            attendance_created = attendance.len(),
            "Session created"
        );

        // 3. Hydrate for the response
        let view = self.hydrator.hydrate_one(cmd.tenant_id, session).await?;

        Ok(CreateSessionResult { view, attendance })
    }
}
