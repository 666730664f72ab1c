//! SessionHydrator - Attaches patron and staff summaries to session rows.
//!
//! A page of sessions costs four queries regardless of its size: patron
//! links, staff links, patron summaries and staff summaries.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, PatronId, SessionId, StaffId, TenantId};
use crate::domain::session::{PatronLink, Session, StaffLink, StaffRole};
use crate::ports::{DirectoryReader, PatronSummary, SessionReader, SessionView, StaffSummary};

pub struct SessionHydrator {
    sessions: Arc<dyn SessionReader>,
    directory: Arc<dyn DirectoryReader>,
}

impl SessionHydrator {
    pub fn new(sessions: Arc<dyn SessionReader>, directory: Arc<dyn DirectoryReader>) -> Self {
        Self {
            sessions,
            directory,
        }
    }

    pub async fn hydrate(
        &self,
        tenant: TenantId,
        sessions: Vec<Session>,
    ) -> Result<Vec<SessionView>, DomainError> {
        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<SessionId> = sessions.iter().map(Session::id).collect();
        let patron_links = self.sessions.patron_links_for(&ids).await?;
        let staff_links = self.sessions.staff_links_for(&ids).await?;

        let patron_ids = unique(patron_links.iter().map(|l| l.patron_id));
        let staff_ids = unique(staff_links.iter().map(|l| l.staff_id));

        let patrons = if patron_ids.is_empty() {
            Vec::new()
        } else {
            self.directory.patron_summaries(tenant, &patron_ids).await?
        };
        let staff = if staff_ids.is_empty() {
            Vec::new()
        } else {
            self.directory.staff_summaries(tenant, &staff_ids).await?
        };

        Ok(assemble(sessions, &patron_links, &staff_links, patrons, staff))
    }

    pub async fn hydrate_one(
        &self,
        tenant: TenantId,
        session: Session,
    ) -> Result<SessionView, DomainError> {
        let id = session.id();
        self.hydrate(tenant, vec![session])
            .await?
            .pop()
            .ok_or_else(|| DomainError::database("hydrate session", format!("session {} lost", id)))
    }
}

/// Joins sessions with their links and the summaries visible to the tenant.
///
/// Link order is preserved. Links whose target has no summary are dropped.
pub fn assemble(
    sessions: Vec<Session>,
    patron_links: &[PatronLink],
    staff_links: &[StaffLink],
    patrons: Vec<PatronSummary>,
    staff: Vec<StaffSummary>,
) -> Vec<SessionView> {
    let patrons: HashMap<PatronId, PatronSummary> =
        patrons.into_iter().map(|p| (p.id, p)).collect();
    let staff: HashMap<StaffId, StaffSummary> = staff.into_iter().map(|s| (s.id, s)).collect();

    sessions
        .into_iter()
        .map(|session| {
            let id = session.id();
            let session_patrons = patron_links
                .iter()
                .filter(|l| l.session_id == id)
                .filter_map(|l| patrons.get(&l.patron_id).cloned())
                .collect();
            let session_staff = staff_links.iter().filter(|l| l.session_id == id);
            let primary = session_staff
                .clone()
                .filter(|l| l.role == StaffRole::Primary)
                .find_map(|l| staff.get(&l.staff_id).cloned());
            let support = session_staff
                .filter(|l| l.role == StaffRole::Support)
                .filter_map(|l| staff.get(&l.staff_id).cloned())
                .collect();

            SessionView {
                session,
                patrons: session_patrons,
                primary,
                support,
            }
        })
        .collect()
}

fn unique<T: Copy + PartialEq>(ids: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use chrono::DateTime;

    fn session(id: i64) -> Session {
        Session::reconstitute(
            SessionId::new(id),
            TenantId::new(1),
            DateTime::parse_from_rfc3339("2024-05-01T22:00:00+09:00").unwrap(),
            None,
            None,
            None,
            Timestamp::now(),
            Timestamp::now(),
        )
    }

    fn patron(id: i64, name: &str) -> PatronSummary {
        PatronSummary {
            id: PatronId::new(id),
            name: name.to_string(),
            photo_url: None,
        }
    }

    fn staff(id: i64, name: &str) -> StaffSummary {
        StaffSummary {
            id: StaffId::new(id),
            name: name.to_string(),
            photo_url: Some(format!("https://img.example/{}.png", id)),
        }
    }

    fn staff_link(session: i64, staff: i64, role: StaffRole) -> StaffLink {
        StaffLink {
            session_id: SessionId::new(session),
            staff_id: StaffId::new(staff),
            role,
        }
    }

    #[test]
    fn keeps_link_order_and_drops_invisible() {
        let links = [
            PatronLink {
                session_id: SessionId::new(1),
                patron_id: PatronId::new(30),
            },
            PatronLink {
                session_id: SessionId::new(1),
                patron_id: PatronId::new(99),
            },
            PatronLink {
                session_id: SessionId::new(1),
                patron_id: PatronId::new(10),
            },
        ];
        let views = assemble(
            vec![session(1)],
            &links,
            &[],
            vec![patron(10, "Aoi"), patron(30, "Mio")],
            vec![],
        );

        let names: Vec<&str> = views[0].patrons.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mio", "Aoi"]);
    }

    #[test]
    fn primary_is_first_visible_primary_link() {
        let links = [
            staff_link(1, 5, StaffRole::Primary),
            staff_link(1, 6, StaffRole::Primary),
            staff_link(1, 7, StaffRole::Support),
        ];
        let views = assemble(
            vec![session(1)],
            &[],
            &links,
            vec![],
            vec![staff(6, "Ren"), staff(7, "Kai")],
        );

        assert_eq!(views[0].primary.as_ref().map(|s| s.id), Some(StaffId::new(6)));
        assert_eq!(views[0].support.len(), 1);
        assert_eq!(views[0].support[0].name, "Kai");
    }

    #[test]
    fn links_are_grouped_by_session() {
        let links = [
            staff_link(1, 5, StaffRole::Support),
            staff_link(2, 6, StaffRole::Primary),
        ];
        let views = assemble(
            vec![session(1), session(2)],
            &[],
            &links,
            vec![],
            vec![staff(5, "Sho"), staff(6, "Ren")],
        );

        assert!(views[0].primary.is_none());
        assert_eq!(views[0].support.len(), 1);
        assert_eq!(views[1].primary.as_ref().map(|s| s.name.as_str()), Some("Ren"));
        assert!(views[1].support.is_empty());
    }

    #[test]
    fn session_without_links_is_empty() {
        let views = assemble(vec![session(1)], &[], &[], vec![], vec![]);
        assert!(views[0].patrons.is_empty());
        assert!(views[0].primary.is_none());
        assert!(views[0].support.is_empty());
    }
}
