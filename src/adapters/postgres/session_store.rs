//! PostgreSQL implementation of SessionStore.
//!
//! One `sqlx::Transaction` backs each write. Dropping it without `commit`
//! rolls back, which is how every error path in the handlers unwinds.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use super::rows::{row_to_session, split_datetime, SESSION_COLUMNS};
use crate::domain::attendance::{AttendanceRecord, DayBucket, NewAttendance};
use crate::domain::foundation::{
    AttendanceId, DomainError, ErrorCode, OwnedByTenant, PatronId, SessionId, StaffId, TenantId,
    Timestamp,
};
use crate::domain::session::{NewSession, PatronLink, Session, StaffLink, StaffRole};
use crate::ports::{OwnershipLookup, SessionStore, SessionTransaction};

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn begin(&self) -> Result<Box<dyn SessionTransaction>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;
        Ok(Box::new(PostgresSessionTransaction { tx }))
    }
}

/// An open write transaction.
pub struct PostgresSessionTransaction {
    tx: sqlx::Transaction<'static, sqlx::Postgres>,
}

#[async_trait]
impl OwnershipLookup for PostgresSessionTransaction {
    async fn patron_exists(
        &mut self,
        tenant: TenantId,
        patron: PatronId,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM patrons
                WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL
            )
            "#,
        )
        .bind(patron.as_i64())
        .bind(tenant.as_i64())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to check patron ownership", e))
    }

    async fn staff_exists(&mut self, tenant: TenantId, staff: StaffId) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM staff
                WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL
            )
            "#,
        )
        .bind(staff.as_i64())
        .bind(tenant.as_i64())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to check staff ownership", e))
    }
}

#[async_trait]
impl SessionTransaction for PostgresSessionTransaction {
    async fn insert_session(&mut self, new: &NewSession) -> Result<Session, DomainError> {
        let now = Timestamp::now();
        let (datetime, offset) = split_datetime(&new.datetime);

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sessions (
                tenant_id, datetime, utc_offset_seconds, table_number, memo, sales_info,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id
            "#,
        )
        .bind(new.tenant_id.as_i64())
        .bind(datetime)
        .bind(offset)
        .bind(new.table_number.as_deref())
        .bind(new.memo.as_deref())
        .bind(new.sales_info.as_ref().map(Json))
        .bind(now.as_datetime())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert session", e))?;

        Ok(Session::from_new(SessionId::new(id), new.clone(), now))
    }

    async fn lock_session(
        &mut self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM sessions
            WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL
            FOR UPDATE
            "#,
            SESSION_COLUMNS
        ))
        .bind(id.as_i64())
        .bind(tenant.as_i64())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to lock session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn update_session(&mut self, session: &Session) -> Result<(), DomainError> {
        let (datetime, offset) = split_datetime(session.datetime());

        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                datetime = $3,
                utc_offset_seconds = $4,
                table_number = $5,
                memo = $6,
                sales_info = $7,
                updated_at = $8
            WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(session.id().as_i64())
        .bind(session.tenant_id().as_i64())
        .bind(datetime)
        .bind(offset)
        .bind(session.table_number())
        .bind(session.memo())
        .bind(session.sales_info().map(Json))
        .bind(session.updated_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to update session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn soft_delete_session(
        &mut self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET deleted_at = $3, updated_at = $3
            WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .bind(tenant.as_i64())
        .bind(Utc::now())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to delete session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_patron_links(&mut self, session: SessionId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM session_patrons WHERE session_id = $1")
            .bind(session.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear patron links", e))?;
        Ok(())
    }

    async fn insert_patron_link(&mut self, link: PatronLink) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO session_patrons (session_id, patron_id) VALUES ($1, $2)")
            .bind(link.session_id.as_i64())
            .bind(link.patron_id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert patron link", e))?;
        Ok(())
    }

    async fn clear_staff_links(
        &mut self,
        session: SessionId,
        role: StaffRole,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM session_staff WHERE session_id = $1 AND role = $2")
            .bind(session.as_i64())
            .bind(role.as_str())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear staff links", e))?;
        Ok(())
    }

    async fn insert_staff_link(&mut self, link: StaffLink) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO session_staff (session_id, staff_id, role) VALUES ($1, $2, $3)")
            .bind(link.session_id.as_i64())
            .bind(link.staff_id.as_i64())
            .bind(link.role.as_str())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert staff link", e))?;
        Ok(())
    }

    async fn attendance_exists(
        &mut self,
        tenant: TenantId,
        patron: PatronId,
        bucket: &DayBucket,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM attendance_records
                WHERE tenant_id = $1
                  AND patron_id = $2
                  AND deleted_at IS NULL
                  AND visit_date >= $3
                  AND visit_date < $4
            )
            "#,
        )
        .bind(tenant.as_i64())
        .bind(patron.as_i64())
        .bind(bucket.start().with_timezone(&Utc))
        .bind(bucket.end().with_timezone(&Utc))
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to check attendance", e))
    }

    async fn insert_attendance(
        &mut self,
        new: &NewAttendance,
    ) -> Result<Option<AttendanceRecord>, DomainError> {
        let now = Timestamp::now();

        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO attendance_records (
                tenant_id, patron_id, visit_day, visit_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (tenant_id, patron_id, visit_day) WHERE deleted_at IS NULL
            DO NOTHING
            RETURNING id
            "#,
        )
        .bind(new.tenant_id.as_i64())
        .bind(new.patron_id.as_i64())
        .bind(new.bucket.day())
        .bind(new.bucket.start().with_timezone(&Utc))
        .bind(now.as_datetime())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert attendance", e))?;

        Ok(id.map(|id| AttendanceRecord::from_new(AttendanceId::new(id), *new, now)))
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))
    }
}
