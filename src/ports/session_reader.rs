//! Session reader port (read side).
//!
//! Reads run on the pool outside write transactions. Link queries are batched
//! by session id so a page of sessions costs a fixed number of round trips.

use async_trait::async_trait;

use super::directory_reader::{PatronSummary, StaffSummary};
use crate::domain::foundation::{DomainError, SessionId, TenantId};
use crate::domain::session::{PatronLink, Session, StaffLink};

/// Reader port for session queries.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// Get a live session owned by `tenant`.
    ///
    /// Returns `None` if not found, foreign, or soft-deleted.
    async fn find_session(
        &self,
        tenant: TenantId,
        id: SessionId,
    ) -> Result<Option<Session>, DomainError>;

    /// List live sessions owned by `tenant`, newest date-time first.
    async fn list_sessions(
        &self,
        tenant: TenantId,
        options: &ListOptions,
    ) -> Result<Vec<Session>, DomainError>;

    /// Patron links of all given sessions, in insertion order per session.
    async fn patron_links_for(&self, sessions: &[SessionId])
        -> Result<Vec<PatronLink>, DomainError>;

    /// Staff links of all given sessions, in insertion order per session.
    async fn staff_links_for(&self, sessions: &[SessionId]) -> Result<Vec<StaffLink>, DomainError>;
}

/// Pagination for session listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: i64,
    pub offset: i64,
}

impl ListOptions {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 200;

    /// Normalizes raw query values. A limit outside `1..=200` falls back to
    /// the default; a negative offset becomes zero.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(l) if (1..=Self::MAX_LIMIT).contains(&l) => l,
            _ => Self::DEFAULT_LIMIT,
        };
        Self {
            limit,
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::from_query(None, None)
    }
}

/// A session with its links resolved to visible patron and staff summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub session: Session,
    /// Visible patrons in link order.
    pub patrons: Vec<PatronSummary>,
    /// First primary link whose staff member is visible.
    pub primary: Option<StaffSummary>,
    /// Visible support staff in link order.
    pub support: Vec<StaffSummary>,
}
