//! ListAttendanceHandler - Attendance history with patron summaries.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{PatronId, TenantId};
use crate::domain::session::SessionError;
use crate::ports::{AttendanceReader, AttendanceView, DirectoryReader, PatronSummary};

#[derive(Debug, Clone, Copy)]
pub struct ListAttendanceQuery {
    pub tenant_id: TenantId,
    /// Restrict to one patron.
    pub patron_id: Option<PatronId>,
}

pub struct ListAttendanceHandler {
    attendance: Arc<dyn AttendanceReader>,
    directory: Arc<dyn DirectoryReader>,
}

impl ListAttendanceHandler {
    pub fn new(attendance: Arc<dyn AttendanceReader>, directory: Arc<dyn DirectoryReader>) -> Self {
        Self {
            attendance,
            directory,
        }
    }

    pub async fn handle(
        &self,
        query: ListAttendanceQuery,
    ) -> Result<Vec<AttendanceView>, SessionError> {
        let records = self
            .attendance
            .list_attendance(query.tenant_id, query.patron_id)
            .await?;

        let mut patron_ids: Vec<PatronId> = records.iter().map(|r| r.patron_id).collect();
        patron_ids.sort_unstable();
        patron_ids.dedup();

        let patrons: HashMap<PatronId, PatronSummary> = if patron_ids.is_empty() {
            HashMap::new()
        } else {
            self.directory
                .patron_summaries(query.tenant_id, &patron_ids)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect()
        };

        Ok(records
            .into_iter()
            .map(|record| AttendanceView {
                patron: patrons.get(&record.patron_id).cloned(),
                record,
            })
            .collect())
    }
}
