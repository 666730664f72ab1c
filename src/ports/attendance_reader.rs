//! Attendance reader port.

use async_trait::async_trait;

use super::directory_reader::PatronSummary;
use crate::domain::attendance::AttendanceRecord;
use crate::domain::foundation::{DomainError, PatronId, TenantId};

#[async_trait]
pub trait AttendanceReader: Send + Sync {
    /// Live attendance records owned by `tenant`, newest visit first.
    ///
    /// Restricted to one patron when `patron` is given.
    async fn list_attendance(
        &self,
        tenant: TenantId,
        patron: Option<PatronId>,
    ) -> Result<Vec<AttendanceRecord>, DomainError>;
}

/// An attendance record with its patron resolved, if still visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceView {
    pub record: AttendanceRecord,
    pub patron: Option<PatronSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn AttendanceReader) {}
    }
}
