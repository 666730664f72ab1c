//! Row decoding shared by the PostgreSQL adapters.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Postgres, Row};

use crate::domain::attendance::AttendanceRecord;
use crate::domain::foundation::{
    AttendanceId, DomainError, ErrorCode, PatronId, SessionId, TenantId, Timestamp,
};
use crate::domain::session::{SalesInfo, Session, StaffRole};

/// Columns selected wherever a full session row is read.
pub(super) const SESSION_COLUMNS: &str = "id, tenant_id, datetime, utc_offset_seconds, \
     table_number, memo, sales_info, created_at, updated_at";

/// Columns selected wherever a full attendance row is read.
pub(super) const ATTENDANCE_COLUMNS: &str =
    "id, tenant_id, patron_id, visit_day, visit_date, memo, created_at, updated_at";

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

/// Splits a date-time into the UTC instant and the offset it was written in.
pub(super) fn split_datetime(dt: &DateTime<FixedOffset>) -> (DateTime<Utc>, i32) {
    (dt.with_timezone(&Utc), dt.offset().local_minus_utc())
}

fn join_datetime(utc: DateTime<Utc>, offset_seconds: i32) -> Result<DateTime<FixedOffset>, DomainError> {
    let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid stored UTC offset: {}", offset_seconds),
        )
    })?;
    Ok(utc.with_timezone(&offset))
}

pub(super) fn row_to_session(row: &PgRow) -> Result<Session, DomainError> {
    let datetime = join_datetime(column(row, "datetime")?, column(row, "utc_offset_seconds")?)?;
    let sales_info: Option<Json<SalesInfo>> = column(row, "sales_info")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(Session::reconstitute(
        SessionId::new(column(row, "id")?),
        TenantId::new(column(row, "tenant_id")?),
        datetime,
        column(row, "table_number")?,
        column(row, "memo")?,
        sales_info.map(|Json(info)| info),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

pub(super) fn row_to_attendance(row: &PgRow) -> Result<AttendanceRecord, DomainError> {
    let visit_day: NaiveDate = column(row, "visit_day")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(AttendanceRecord {
        id: AttendanceId::new(column(row, "id")?),
        tenant_id: TenantId::new(column(row, "tenant_id")?),
        patron_id: PatronId::new(column(row, "patron_id")?),
        visit_day,
        visit_date: column(row, "visit_date")?,
        memo: column(row, "memo")?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}

pub(super) fn str_to_role(s: &str) -> Result<StaffRole, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid staff role: {}", s),
        )
    })
}
