//! PostgreSQL implementation of AttendanceReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{row_to_attendance, ATTENDANCE_COLUMNS};
use crate::domain::attendance::AttendanceRecord;
use crate::domain::foundation::{DomainError, PatronId, TenantId};
use crate::ports::AttendanceReader;

/// PostgreSQL implementation of AttendanceReader.
#[derive(Clone)]
pub struct PostgresAttendanceReader {
    pool: PgPool,
}

impl PostgresAttendanceReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceReader for PostgresAttendanceReader {
    async fn list_attendance(
        &self,
        tenant: TenantId,
        patron: Option<PatronId>,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM attendance_records
            WHERE tenant_id = $1
              AND deleted_at IS NULL
              AND ($2::BIGINT IS NULL OR patron_id = $2)
            ORDER BY visit_date DESC, id DESC
            "#,
            ATTENDANCE_COLUMNS
        ))
        .bind(tenant.as_i64())
        .bind(patron.map(|p| p.as_i64()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list attendance", e))?;

        rows.iter().map(row_to_attendance).collect()
    }
}
