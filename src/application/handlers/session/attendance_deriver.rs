//! AttendanceDeriver - Ensures one attendance record per patron per day.
//!
//! Runs on session creation only. The day is the calendar day of the session
//! date-time in the offset it was submitted with.

use chrono::{DateTime, FixedOffset};

use crate::domain::attendance::{AttendanceRecord, DayBucket, NewAttendance};
use crate::domain::foundation::{DomainError, ErrorCode, PatronId, TenantId};
use crate::ports::SessionTransaction;

#[derive(Debug, Clone, Copy)]
pub struct AttendanceDeriver {
    tenant: TenantId,
}

impl AttendanceDeriver {
    pub fn new(tenant: TenantId) -> Self {
        Self { tenant }
    }

    /// Inserts a record for each accepted patron that has none on the
    /// session's day. Returns only the records this call inserted.
    ///
    /// `patrons` must already have passed ownership validation.
    pub async fn derive<T>(
        &self,
        tx: &mut T,
        at: DateTime<FixedOffset>,
        patrons: &[PatronId],
    ) -> Result<Vec<AttendanceRecord>, DomainError>
    where
        T: SessionTransaction + ?Sized,
    {
        let bucket = DayBucket::containing(at).ok_or_else(|| {
            DomainError::new(ErrorCode::ValidationFailed, format!("{} has no calendar day", at))
                .with_detail("field", "datetime")
        })?;
        let mut inserted = Vec::new();

        for patron_id in patrons {
            if tx.attendance_exists(self.tenant, *patron_id, &bucket).await? {
                tracing::debug!(
                    tenant_id = %self.tenant,
                    patron_id = %patron_id,
                    day = %bucket.day(),
                    "Attendance already recorded"
                );
                continue;
            }

            let new = NewAttendance {
                tenant_id: self.tenant,
                patron_id: *patron_id,
                bucket,
            };
            match tx.insert_attendance(&new).await? {
                Some(record) => inserted.push(record),
                None => tracing::debug!(
                    tenant_id = %self.tenant,
                    patron_id = %patron_id,
                    day = %bucket.day(),
                    "Attendance recorded concurrently"
                ),
            }
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FailPoint, InMemoryStore};
    use crate::ports::SessionStore;
    use chrono::NaiveDate;

    fn tenant() -> TenantId {
        TenantId::new(1)
    }

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    async fn derive(store: &InMemoryStore, raw: &str, patrons: &[PatronId]) -> Vec<AttendanceRecord> {
        let mut tx = store.begin().await.unwrap();
        let records = AttendanceDeriver::new(tenant())
            .derive(&mut *tx, at(raw), patrons)
            .await
            .unwrap();
        tx.commit().await.unwrap();
        records
    }

    #[tokio::test]
    async fn inserts_one_record_per_patron() {
        let store = InMemoryStore::new();
        let aoi = store.add_patron(tenant(), "Aoi", None).await;
        let mio = store.add_patron(tenant(), "Mio", None).await;

        let records = derive(&store, "2024-05-01T22:00:00+09:00", &[aoi, mio]).await;

        assert_eq!(records.len(), 2);
        assert!(records
            .iter()
            .all(|r| r.visit_day == NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    }

    #[tokio::test]
    async fn same_day_is_skipped() {
        let store = InMemoryStore::new();
        let aoi = store.add_patron(tenant(), "Aoi", None).await;

        derive(&store, "2024-05-01T19:00:00+09:00", &[aoi]).await;
        let second = derive(&store, "2024-05-01T23:30:00+09:00", &[aoi]).await;

        assert!(second.is_empty());
        assert_eq!(store.attendance_records().await.len(), 1);
    }

    #[tokio::test]
    async fn next_local_day_gets_a_new_record() {
        let store = InMemoryStore::new();
        let aoi = store.add_patron(tenant(), "Aoi", None).await;

        derive(&store, "2024-05-01T23:30:00+09:00", &[aoi]).await;
        let next = derive(&store, "2024-05-02T00:30:00+09:00", &[aoi]).await;

        assert_eq!(next.len(), 1);
        assert_eq!(
            next[0].visit_day,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
    }

    #[tokio::test]
    async fn insert_failure_propagates() {
        let store = InMemoryStore::new();
        let aoi = store.add_patron(tenant(), "Aoi", None).await;
        store.fail_on(Some(FailPoint::InsertAttendance)).await;

        let mut tx = store.begin().await.unwrap();
        let result = AttendanceDeriver::new(tenant())
            .derive(&mut *tx, at("2024-05-01T22:00:00+09:00"), &[aoi])
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unbucketable_instant_is_a_validation_error() {
        let store = InMemoryStore::new();
        let aoi = store.add_patron(tenant(), "Aoi", None).await;
        let last = DateTime::<chrono::Utc>::MAX_UTC.fixed_offset();

        let mut tx = store.begin().await.unwrap();
        let err = AttendanceDeriver::new(tenant())
            .derive(&mut *tx, last, &[aoi])
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("datetime"));
    }
}
