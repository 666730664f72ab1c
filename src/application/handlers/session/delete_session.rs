//! DeleteSessionHandler - Soft-deletes a session.
//!
//! Link rows and attendance records are left as they are.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, TenantId};
use crate::domain::session::SessionError;
use crate::ports::{SessionStore, SessionTransaction};

#[derive(Debug, Clone, Copy)]
pub struct DeleteSessionCommand {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
}

pub struct DeleteSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl DeleteSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeleteSessionCommand) -> Result<(), SessionError> {
        let mut tx = self.store.begin().await?;
        if !tx.soft_delete_session(cmd.tenant_id, cmd.session_id).await? {
            return Err(SessionError::not_found(cmd.session_id));
        }
        tx.commit().await?;

        tracing::info!(
            tenant_id = %cmd.tenant_id,
            session_id = %cmd.session_id,
            "Session deleted"
        );
        Ok(())
    }
}
