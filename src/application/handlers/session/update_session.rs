//! UpdateSessionHandler - Command handler for sparse session updates.
//!
//! Only fields present in the command change. Link slots present in the
//! command are replaced; absent slots keep their rows. Attendance is never
//! derived on update.

use std::sync::Arc;

use super::hydration::SessionHydrator;
use super::ownership_validator::OwnershipValidator;
use super::relation_reconciler::RelationReconciler;
use crate::domain::foundation::{PatronId, SessionId, StaffId, TenantId, Timestamp};
use crate::domain::session::{
    parse_session_datetime, FieldUpdate, LinkPlan, SalesInfo, SessionError, SessionPatch,
};
use crate::ports::{SessionStore, SessionTransaction, SessionView};

/// Command to update an existing session.
///
/// `Option<Option<_>>` and `FieldUpdate` separate an absent field from an
/// explicit null.
#[derive(Debug, Clone)]
pub struct UpdateSessionCommand {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
    /// `None` and `""` leave the date-time unchanged; it cannot be cleared.
    pub datetime: Option<String>,
    pub table_number: FieldUpdate<String>,
    pub memo: FieldUpdate<String>,
    pub sales_info: FieldUpdate<serde_json::Value>,
    pub patron_ids: Option<Vec<PatronId>>,
    pub primary_staff_id: FieldUpdate<StaffId>,
    pub support_staff_ids: Option<Vec<StaffId>>,
}

impl UpdateSessionCommand {
    /// A command that touches nothing.
    pub fn new(tenant_id: TenantId, session_id: SessionId) -> Self {
        Self {
            tenant_id,
            session_id,
            datetime: None,
            table_number: FieldUpdate::Unchanged,
            memo: FieldUpdate::Unchanged,
            sales_info: FieldUpdate::Unchanged,
            patron_ids: None,
            primary_staff_id: FieldUpdate::Unchanged,
            support_staff_ids: None,
        }
    }
}

/// Handler for updating sessions.
pub struct UpdateSessionHandler {
    store: Arc<dyn SessionStore>,
    hydrator: Arc<SessionHydrator>,
}

impl UpdateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>, hydrator: Arc<SessionHydrator>) -> Self {
        Self { store, hydrator }
    }

    pub async fn handle(&self, cmd: UpdateSessionCommand) -> Result<SessionView, SessionError> {
        // 1. Validate input before opening a transaction
        let datetime = match cmd.datetime.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_session_datetime(raw)?),
        };
        let patch = SessionPatch {
            datetime,
            table_number: cmd.table_number,
            memo: cmd.memo,
            sales_info: cmd.sales_info.try_map(SalesInfo::from_json)?,
        };
        let plan = LinkPlan {
            patrons: cmd.patron_ids,
            primary: cmd.primary_staff_id,
            support: cmd.support_staff_ids,
        };

        // 2. Lock, patch and reconcile in one transaction
        let mut tx = self.store.begin().await?;
        let mut session = tx
            .lock_session(cmd.tenant_id, cmd.session_id)
            .await?
            .ok_or(SessionError::not_found(cmd.session_id))?;

        session.apply(patch, Timestamp::now());
        tx.update_session(&session).await?;

        if !plan.is_noop() {
            let validator = OwnershipValidator::new(cmd.tenant_id);
            RelationReconciler::new(validator)
                .reconcile(&mut *tx, session.id(), &plan)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            tenant_id = %cmd.tenant_id,
            session_id = %session.id(),
            links_touched = !plan.is_noop(),
            "Session updated"
        );

        // 3. Hydrate for the response
        Ok(self.hydrator.hydrate_one(cmd.tenant_id, session).await?)
    }
}
