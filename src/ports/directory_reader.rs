//! Directory reader port.
//!
//! Patrons and staff are owned by a separate CRUD surface. This core only
//! needs their display summaries, always scoped to the acting tenant.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PatronId, StaffId, TenantId};

/// Display summary of a patron.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatronSummary {
    pub id: PatronId,
    pub name: String,
    pub photo_url: Option<String>,
}

/// Display summary of a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffSummary {
    pub id: StaffId,
    pub name: String,
    pub photo_url: Option<String>,
}

/// Batched summary lookups.
///
/// Ids that are absent, soft-deleted, or owned by another tenant are omitted
/// from the result without error. Result order is unspecified.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    async fn patron_summaries(
        &self,
        tenant: TenantId,
        ids: &[PatronId],
    ) -> Result<Vec<PatronSummary>, DomainError>;

    async fn staff_summaries(
        &self,
        tenant: TenantId,
        ids: &[StaffId],
    ) -> Result<Vec<StaffSummary>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn DirectoryReader) {}
    }
}
