//! HTTP DTOs for session endpoints.
//!
//! Field names follow the client contract: `himeIds` are patrons,
//! `mainCastId` is the primary staff member, `helpCastIds` are support staff.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::session::{CreateSessionCommand, UpdateSessionCommand};
use crate::domain::foundation::{PatronId, SessionId, StaffId, TenantId};
use crate::domain::session::{FieldUpdate, SalesInfo};
use crate::ports::{ListOptions, PatronSummary, SessionView, StaffSummary};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /table` and `PUT /table/:id`.
///
/// Every field is `Option<Option<_>>`: outer `None` means the key was absent,
/// `Some(None)` means it was sent as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub datetime: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub table_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub memo: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub sales_info: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "nullable")]
    pub hime_ids: Option<Option<Vec<i64>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub main_cast_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub help_cast_ids: Option<Option<Vec<i64>>>,
}

fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SessionRequest {
    pub fn into_create(self, tenant_id: TenantId) -> CreateSessionCommand {
        CreateSessionCommand {
            tenant_id,
            datetime: self.datetime.flatten(),
            table_number: self.table_number.flatten(),
            memo: self.memo.flatten(),
            sales_info: self.sales_info.flatten(),
            patron_ids: patrons(self.hime_ids.flatten().unwrap_or_default()),
            primary_staff_id: self.main_cast_id.flatten().map(StaffId::new),
            support_staff_ids: staff(self.help_cast_ids.flatten().unwrap_or_default()),
        }
    }

    /// A `null` id list empties the slot; an absent one leaves it alone.
    /// A `null` date-time is treated as absent.
    pub fn into_update(self, tenant_id: TenantId, session_id: SessionId) -> UpdateSessionCommand {
        UpdateSessionCommand {
            datetime: self.datetime.flatten(),
            table_number: FieldUpdate::from_nullable(self.table_number),
            memo: FieldUpdate::from_nullable(self.memo),
            sales_info: FieldUpdate::from_nullable(self.sales_info),
            patron_ids: self.hime_ids.map(|ids| patrons(ids.unwrap_or_default())),
            primary_staff_id: FieldUpdate::from_nullable(self.main_cast_id).map(StaffId::new),
            support_staff_ids: self.help_cast_ids.map(|ids| staff(ids.unwrap_or_default())),
            ..UpdateSessionCommand::new(tenant_id, session_id)
        }
    }
}

fn patrons(raw: Vec<i64>) -> Vec<PatronId> {
    raw.into_iter().map(PatronId::new).collect()
}

fn staff(raw: Vec<i64>) -> Vec<StaffId> {
    raw.into_iter().map(StaffId::new).collect()
}

/// `GET /table?limit=&offset=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSessionsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<ListSessionsParams> for ListOptions {
    fn from(params: ListSessionsParams) -> Self {
        ListOptions::from_query(params.limit, params.offset)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A linked patron or staff member.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub photo_url: Option<String>,
}

impl From<PatronSummary> for PersonResponse {
    fn from(p: PatronSummary) -> Self {
        Self {
            id: p.id.as_i64(),
            name: p.name,
            photo_url: p.photo_url,
        }
    }
}

impl From<StaffSummary> for PersonResponse {
    fn from(s: StaffSummary) -> Self {
        Self {
            id: s.id.as_i64(),
            name: s.name,
            photo_url: s.photo_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: i64,
    /// RFC 3339 in the offset the client wrote it in
    pub datetime: String,
    pub table_number: Option<String>,
    pub memo: Option<String>,
    pub sales_info: Option<SalesInfo>,
    pub created_at: String,
    pub updated_at: String,
    pub hime_list: Vec<PersonResponse>,
    pub main_cast: Option<PersonResponse>,
    pub help_casts: Vec<PersonResponse>,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        let session = view.session;
        Self {
            id: session.id().as_i64(),
            datetime: session.datetime().to_rfc3339(),
            table_number: session.table_number().map(String::from),
            memo: session.memo().map(String::from),
            sales_info: session.sales_info().cloned(),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
            hime_list: view.patrons.into_iter().map(Into::into).collect(),
            main_cast: view.primary.map(Into::into),
            help_casts: view.support.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
