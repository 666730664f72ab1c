//! PostgreSQL implementation of DirectoryReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::column;
use crate::domain::foundation::{DomainError, PatronId, StaffId, TenantId};
use crate::ports::{DirectoryReader, PatronSummary, StaffSummary};

/// PostgreSQL implementation of DirectoryReader.
#[derive(Clone)]
pub struct PostgresDirectoryReader {
    pool: PgPool,
}

impl PostgresDirectoryReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryReader for PostgresDirectoryReader {
    async fn patron_summaries(
        &self,
        tenant: TenantId,
        ids: &[PatronId],
    ) -> Result<Vec<PatronSummary>, DomainError> {
        let ids: Vec<i64> = ids.iter().map(PatronId::as_i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, name, photo_url
            FROM patrons
            WHERE tenant_id = $1 AND id = ANY($2) AND deleted_at IS NULL
            "#,
        )
        .bind(tenant.as_i64())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch patron summaries", e))?;

        rows.iter()
            .map(|row| {
                Ok(PatronSummary {
                    id: PatronId::new(column(row, "id")?),
                    name: column(row, "name")?,
                    photo_url: column(row, "photo_url")?,
                })
            })
            .collect()
    }

    async fn staff_summaries(
        &self,
        tenant: TenantId,
        ids: &[StaffId],
    ) -> Result<Vec<StaffSummary>, DomainError> {
        let ids: Vec<i64> = ids.iter().map(StaffId::as_i64).collect();
        let rows = sqlx::query(
            r#"
            SELECT id, name, photo_url
            FROM staff
            WHERE tenant_id = $1 AND id = ANY($2) AND deleted_at IS NULL
            "#,
        )
        .bind(tenant.as_i64())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch staff summaries", e))?;

        rows.iter()
            .map(|row| {
                Ok(StaffSummary {
                    id: StaffId::new(column(row, "id")?),
                    name: column(row, "name")?,
                    photo_url: column(row, "photo_url")?,
                })
            })
            .collect()
    }
}
