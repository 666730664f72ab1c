//! PostgreSQL implementation of SessionReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{column, row_to_session, str_to_role, SESSION_COLUMNS};
use crate::domain::foundation::{DomainError, PatronId, SessionId, StaffId, TenantId};
use crate::domain::session::{PatronLink, Session, StaffLink};
use crate::ports::{ListOptions, SessionReader};

/// PostgreSQL implementation of SessionReader.
#[derive(Clone)]
pub struct PostgresSessionReader {
    pool: PgPool,
}

impl PostgresSessionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionReader for PostgresSessionReader {
    async fn find_session(
        &self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM sessions
            WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL
            "#,
            SESSION_COLUMNS
        ))
        .bind(id.as_i64())
        .bind(tenant.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn list_sessions(
        &self,
        tenant: TenantId,
        options: &ListOptions,
    ) -> Result<Vec<Session>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM sessions
            WHERE tenant_id = $1 AND deleted_at IS NULL
            ORDER BY datetime DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            SESSION_COLUMNS
        ))
        .bind(tenant.as_i64())
        .bind(options.limit)
        .bind(options.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list sessions", e))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn patron_links_for(
        &self,
        sessions: &[SessionId],
    ) -> Result<Vec<PatronLink>, DomainError> {
        let ids: Vec<i64> = sessions.iter().map(SessionId::as_i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT session_id, patron_id
            FROM session_patrons
            WHERE session_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch patron links", e))?;

        rows.iter()
            .map(|row| {
                Ok(PatronLink {
                    session_id: SessionId::new(column(row, "session_id")?),
                    patron_id: PatronId::new(column(row, "patron_id")?),
                })
            })
            .collect()
    }

    async fn staff_links_for(&self, sessions: &[SessionId]) -> Result<Vec<StaffLink>, DomainError> {
        let ids: Vec<i64> = sessions.iter().map(SessionId::as_i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT session_id, staff_id, role
            FROM session_staff
            WHERE session_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch staff links", e))?;

        rows.iter()
            .map(|row| {
                let role: String = column(row, "role")?;
                Ok(StaffLink {
                    session_id: SessionId::new(column(row, "session_id")?),
                    staff_id: StaffId::new(column(row, "staff_id")?),
                    role: str_to_role(&role)?,
                })
            })
            .collect()
    }
}
