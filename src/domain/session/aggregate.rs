//! Session entity.
//!
//! Identifiers are assigned by the database, so a session is first described
//! as a [`NewSession`] and only becomes a [`Session`] once inserted.

use chrono::{DateTime, FixedOffset};

use super::patch::SessionPatch;
use super::sales::SalesInfo;
use crate::domain::foundation::{OwnedByTenant, SessionId, TenantId, Timestamp};

/// Base columns of a session about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub tenant_id: TenantId,
    pub datetime: DateTime<FixedOffset>,
    pub table_number: Option<String>,
    pub memo: Option<String>,
    pub sales_info: Option<SalesInfo>,
}

impl NewSession {
    /// Creates the base row. Blank labels and notes are stored as absent.
    pub fn new(
        tenant_id: TenantId,
        datetime: DateTime<FixedOffset>,
        table_number: Option<String>,
        memo: Option<String>,
        sales_info: Option<SalesInfo>,
    ) -> Self {
        Self {
            tenant_id,
            datetime,
            table_number: non_blank(table_number),
            memo: non_blank(memo),
            sales_info,
        }
    }
}

/// A recorded venue booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    tenant_id: TenantId,
    datetime: DateTime<FixedOffset>,
    table_number: Option<String>,
    memo: Option<String>,
    sales_info: Option<SalesInfo>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Rebuilds a session from a stored row.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        tenant_id: TenantId,
        datetime: DateTime<FixedOffset>,
        table_number: Option<String>,
        memo: Option<String>,
        sales_info: Option<SalesInfo>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            tenant_id,
            datetime,
            table_number,
            memo,
            sales_info,
            created_at,
            updated_at,
        }
    }

    /// Materializes a freshly inserted row.
    pub fn from_new(id: SessionId, new: NewSession, now: Timestamp) -> Self {
        Self::reconstitute(
            id,
            new.tenant_id,
            new.datetime,
            new.table_number,
            new.memo,
            new.sales_info,
            now,
            now,
        )
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn datetime(&self) -> &DateTime<FixedOffset> {
        &self.datetime
    }

    pub fn table_number(&self) -> Option<&str> {
        self.table_number.as_deref()
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn sales_info(&self) -> Option<&SalesInfo> {
        self.sales_info.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Applies a sparse update. Only slots present in the patch change;
    /// `updated_at` is always bumped.
    pub fn apply(&mut self, patch: SessionPatch, now: Timestamp) {
        if let Some(datetime) = patch.datetime {
            self.datetime = datetime;
        }
        patch.table_number.apply_to(&mut self.table_number);
        self.table_number = non_blank(self.table_number.take());
        patch.memo.apply_to(&mut self.memo);
        self.memo = non_blank(self.memo.take());
        patch.sales_info.apply_to(&mut self.sales_info);
        self.updated_at = now;
    }
}

impl OwnedByTenant for Session {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::FieldUpdate;
    use chrono::DateTime;

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    fn sample() -> Session {
        let new = NewSession::new(
            TenantId::new(1),
            at("2024-05-01T22:00:00+09:00"),
            Some("A-3".to_string()),
            Some("birthday".to_string()),
            None,
        );
        Session::from_new(SessionId::new(10), new, Timestamp::now())
    }

    #[test]
    fn blank_strings_are_stored_as_absent() {
        let new = NewSession::new(
            TenantId::new(1),
            at("2024-05-01T22:00:00+09:00"),
            Some(String::new()),
            Some(String::new()),
            None,
        );
        assert!(new.table_number.is_none());
        assert!(new.memo.is_none());
    }

    #[test]
    fn patch_touching_memo_only_keeps_other_fields() {
        let mut session = sample();
        let before = session.clone();

        session.apply(
            SessionPatch {
                memo: FieldUpdate::Set("anniversary".to_string()),
                ..Default::default()
            },
            Timestamp::now(),
        );

        assert_eq!(session.memo(), Some("anniversary"));
        assert_eq!(session.table_number(), before.table_number());
        assert_eq!(session.datetime(), before.datetime());
    }

    #[test]
    fn patch_clear_removes_value() {
        let mut session = sample();
        session.apply(
            SessionPatch {
                table_number: FieldUpdate::Clear,
                ..Default::default()
            },
            Timestamp::now(),
        );
        assert!(session.table_number().is_none());
    }

    #[test]
    fn patch_setting_empty_string_clears() {
        let mut session = sample();
        session.apply(
            SessionPatch {
                memo: FieldUpdate::Set(String::new()),
                ..Default::default()
            },
            Timestamp::now(),
        );
        assert!(session.memo().is_none());
    }

    #[test]
    fn session_is_owned_by_its_tenant() {
        let session = sample();
        assert!(session.is_owned_by(TenantId::new(1)));
        assert!(!session.is_owned_by(TenantId::new(2)));
    }
}
