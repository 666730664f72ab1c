//! Attendance records.

use chrono::{DateTime, NaiveDate, Utc};

use super::day_bucket::DayBucket;
use crate::domain::foundation::{AttendanceId, OwnedByTenant, PatronId, TenantId, Timestamp};

/// Attendance record about to be inserted for one (tenant, patron, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAttendance {
    pub tenant_id: TenantId,
    pub patron_id: PatronId,
    pub bucket: DayBucket,
}

/// One-per-day marker of a patron's visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub tenant_id: TenantId,
    pub patron_id: PatronId,
    /// Local calendar day of the visit; the uniqueness key.
    pub visit_day: NaiveDate,
    /// Local midnight opening that day.
    pub visit_date: DateTime<Utc>,
    pub memo: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AttendanceRecord {
    /// Materializes a freshly inserted record. Derived records carry no memo.
    pub fn from_new(id: AttendanceId, new: NewAttendance, now: Timestamp) -> Self {
        Self {
            id,
            tenant_id: new.tenant_id,
            patron_id: new.patron_id,
            visit_day: new.bucket.day(),
            visit_date: new.bucket.start().with_timezone(&Utc),
            memo: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True if this record marks a visit by `patron` inside `bucket`.
    pub fn covers(&self, tenant: TenantId, patron: PatronId, bucket: &DayBucket) -> bool {
        self.is_owned_by(tenant) && self.patron_id == patron && bucket.contains(&self.visit_date)
    }
}

impl OwnedByTenant for AttendanceRecord {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
