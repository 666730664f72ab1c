//! HTTP DTOs for attendance endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::session::PersonResponse;
use crate::ports::AttendanceView;

/// `GET /visit?himeId=`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttendanceParams {
    pub hime_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: i64,
    pub hime_id: i64,
    /// Calendar day in the offset the session was recorded with
    pub visit_day: NaiveDate,
    /// That day's local midnight, rendered in UTC
    pub visit_date: String,
    pub memo: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Null when the patron has since been removed
    pub hime: Option<PersonResponse>,
}

impl From<AttendanceView> for AttendanceResponse {
    fn from(view: AttendanceView) -> Self {
        let record = view.record;
        Self {
            id: record.id.as_i64(),
            hime_id: record.patron_id.as_i64(),
            visit_day: record.visit_day,
            visit_date: record.visit_date.to_rfc3339(),
            memo: record.memo,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
            hime: view.patron.map(Into::into),
        }
    }
}
