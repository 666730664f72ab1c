//! ListSessionsHandler - Query handler for a page of hydrated sessions.

use std::sync::Arc;

use super::hydration::SessionHydrator;
use crate::domain::foundation::TenantId;
use crate::domain::session::SessionError;
use crate::ports::{ListOptions, SessionReader, SessionView};

#[derive(Debug, Clone, Copy)]
pub struct ListSessionsQuery {
    pub tenant_id: TenantId,
    pub options: ListOptions,
}

pub struct ListSessionsHandler {
    reader: Arc<dyn SessionReader>,
    hydrator: Arc<SessionHydrator>,
}

impl ListSessionsHandler {
    pub fn new(reader: Arc<dyn SessionReader>, hydrator: Arc<SessionHydrator>) -> Self {
        Self { reader, hydrator }
    }

    pub async fn handle(&self, query: ListSessionsQuery) -> Result<Vec<SessionView>, SessionError> {
        let sessions = self
            .reader
            .list_sessions(query.tenant_id, &query.options)
            .await?;
        Ok(self.hydrator.hydrate(query.tenant_id, sessions).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::session::NewSession;
    use crate::ports::{SessionStore, SessionTransaction};
    use chrono::DateTime;

    fn tenant() -> TenantId {
        TenantId::new(1)
    }

    async fn seed(store: &InMemoryStore, tenant: TenantId, raw: &str) {
        let mut tx = store.begin().await.unwrap();
        tx.insert_session(&NewSession::new(
            tenant,
            DateTime::parse_from_rfc3339(raw).unwrap(),
            None,
            None,
            None,
        ))
        .await
        .unwrap();
        tx.commit().await.unwrap();
    }

    fn handler(store: &InMemoryStore) -> ListSessionsHandler {
        let shared = Arc::new(store.clone());
        let hydrator = Arc::new(SessionHydrator::new(shared.clone(), shared.clone()));
        ListSessionsHandler::new(shared, hydrator)
    }

    #[tokio::test]
    async fn lists_newest_first_for_tenant_only() {
        let store = InMemoryStore::new();
        seed(&store, tenant(), "2024-05-01T20:00:00+09:00").await;
        seed(&store, tenant(), "2024-05-03T20:00:00+09:00").await;
        seed(&store, TenantId::new(2), "2024-05-02T20:00:00+09:00").await;

        let views = handler(&store)
            .handle(ListSessionsQuery {
                tenant_id: tenant(),
                options: ListOptions::default(),
            })
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert!(views[0].session.datetime() > views[1].session.datetime());
    }

    #[tokio::test]
    async fn applies_limit_and_offset() {
        let store = InMemoryStore::new();
        for day in 1..=5 {
            seed(&store, tenant(), &format!("2024-05-0{}T20:00:00+09:00", day)).await;
        }

        let views = handler(&store)
            .handle(ListSessionsQuery {
                tenant_id: tenant(),
                options: ListOptions::from_query(Some(2), Some(1)),
            })
            .await
            .unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].session.datetime().to_rfc3339(), "2024-05-04T20:00:00+09:00");
    }
}
