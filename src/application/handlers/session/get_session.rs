//! GetSessionHandler - Query handler for one hydrated session.

use std::sync::Arc;

use super::hydration::SessionHydrator;
use crate::domain::foundation::{SessionId, TenantId};
use crate::domain::session::SessionError;
use crate::ports::{SessionReader, SessionView};

#[derive(Debug, Clone, Copy)]
pub struct GetSessionQuery {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
}

pub struct GetSessionHandler {
    reader: Arc<dyn SessionReader>,
    hydrator: Arc<SessionHydrator>,
}

impl GetSessionHandler {
    pub fn new(reader: Arc<dyn SessionReader>, hydrator: Arc<SessionHydrator>) -> Self {
        Self { reader, hydrator }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionView, SessionError> {
        let session = self
            .reader
            .find_session(query.tenant_id, query.session_id)
            .await?
            .ok_or(SessionError::not_found(query.session_id))?;

        Ok(self.hydrator.hydrate_one(query.tenant_id, session).await?)
    }
}
