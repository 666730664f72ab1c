//! End-to-end properties of the session write path.
//!
//! Drives the application handlers against the in-memory adapter, so every
//! check covers ownership filtering, link reconciliation, attendance derivation
//! and hydration together.

use std::sync::Arc;

use chrono::NaiveDate;

use hostnote::adapters::memory::InMemoryStore;
use hostnote::application::handlers::session::{
    CreateSessionCommand, CreateSessionHandler, DeleteSessionCommand, DeleteSessionHandler,
    SessionHydrator, UpdateSessionCommand, UpdateSessionHandler,
};
use hostnote::domain::foundation::{PatronId, SessionId, StaffId, TenantId};
use hostnote::domain::session::{FieldUpdate, StaffRole};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TENANT: TenantId = TenantId::new(1);
const OTHER_TENANT: TenantId = TenantId::new(2);

struct Harness {
    store: InMemoryStore,
    create: CreateSessionHandler,
    update: UpdateSessionHandler,
    delete: DeleteSessionHandler,
}

impl Harness {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let shared = Arc::new(store.clone());
        let hydrator = Arc::new(SessionHydrator::new(shared.clone(), shared.clone()));
        Self {
            create: CreateSessionHandler::new(shared.clone(), hydrator.clone()),
            update: UpdateSessionHandler::new(shared.clone(), hydrator),
            delete: DeleteSessionHandler::new(shared),
            store,
        }
    }

    fn command(datetime: &str, patrons: Vec<PatronId>) -> CreateSessionCommand {
        CreateSessionCommand {
            tenant_id: TENANT,
            datetime: Some(datetime.to_string()),
            table_number: None,
            memo: None,
            sales_info: None,
            patron_ids: patrons,
            primary_staff_id: None,
            support_staff_ids: vec![],
        }
    }

    async fn create_at(&self, datetime: &str, patrons: Vec<PatronId>) -> SessionId {
        self.create
            .handle(Self::command(datetime, patrons))
            .await
            .unwrap()
            .view
            .session
            .id()
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Attendance
// =============================================================================

#[tokio::test]
async fn one_record_per_distinct_patron_per_call() {
    let h = Harness::new();
    let a = h.store.add_patron(TENANT, "Aoi", None).await;
    let b = h.store.add_patron(TENANT, "Rin", None).await;

    let result = h
        .create
        .handle(Harness::command(
            "2024-05-01T22:00:00+09:00",
            vec![a, b, a, b, a],
        ))
        .await
        .unwrap();

    let mut patrons: Vec<PatronId> = result.attendance.iter().map(|r| r.patron_id).collect();
    patrons.sort();
    assert_eq!(patrons, vec![a, b]);
    assert_eq!(h.store.attendance_records().await.len(), 2);
}

#[tokio::test]
async fn attendance_day_uses_session_offset() {
    let h = Harness::new();
    let patron = h.store.add_patron(TENANT, "Aoi", None).await;

    // 22:00 at +09:00 is 13:00 UTC on the same day; 01:00 at +09:00 is the previous UTC day.
    let result = h
        .create
        .handle(Harness::command("2024-05-01T22:00:00+09:00", vec![patron]))
        .await
        .unwrap();
    assert_eq!(result.attendance.len(), 1);
    assert_eq!(result.attendance[0].visit_day, day(2024, 5, 1));

    let early = h
        .create
        .handle(Harness::command("2024-05-03T01:00:00+09:00", vec![patron]))
        .await
        .unwrap();
    assert_eq!(early.attendance[0].visit_day, day(2024, 5, 3));
}

#[tokio::test]
async fn second_session_same_day_adds_no_attendance() {
    let h = Harness::new();
    let patron = h.store.add_patron(TENANT, "Aoi", None).await;

    h.create_at("2024-05-01T19:00:00+09:00", vec![patron]).await;
    let second = h
        .create
        .handle(Harness::command("2024-05-01T23:30:00+09:00", vec![patron]))
        .await
        .unwrap();

    assert!(second.attendance.is_empty());
    assert_eq!(h.store.attendance_records().await.len(), 1);
}

#[tokio::test]
async fn concurrent_creation_still_yields_one_record() {
    let h = Arc::new(Harness::new());
    let patron = h.store.add_patron(TENANT, "Aoi", None).await;

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let h = h.clone();
            tokio::spawn(async move { h.create_at("2024-05-01T22:00:00+09:00", vec![patron]).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(h.store.session_count().await, 4);
    assert_eq!(h.store.attendance_records().await.len(), 1);
}

#[tokio::test]
async fn deleting_a_session_keeps_attendance() {
    let h = Harness::new();
    let patron = h.store.add_patron(TENANT, "Aoi", None).await;
    let id = h.create_at("2024-05-01T22:00:00+09:00", vec![patron]).await;

    h.delete
        .handle(DeleteSessionCommand {
            tenant_id: TENANT,
            session_id: id,
        })
        .await
        .unwrap();

    let records = h.store.attendance_records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].patron_id, patron);
}

// =============================================================================
// Ownership and links
// =============================================================================

#[tokio::test]
async fn foreign_patron_is_never_linked() {
    let h = Harness::new();
    let mine = h.store.add_patron(TENANT, "Aoi", None).await;
    let theirs = h.store.add_patron(OTHER_TENANT, "Mei", None).await;

    let result = h
        .create
        .handle(Harness::command("2024-05-01T22:00:00+09:00", vec![theirs, mine]))
        .await
        .unwrap();

    let listed: Vec<PatronId> = result.view.patrons.iter().map(|p| p.id).collect();
    assert_eq!(listed, vec![mine]);
    let linked: Vec<PatronId> = h
        .store
        .patron_links(result.view.session.id())
        .await
        .iter()
        .map(|l| l.patron_id)
        .collect();
    assert_eq!(linked, vec![mine]);
    assert!(result.attendance.iter().all(|r| r.patron_id != theirs));
}

#[tokio::test]
async fn identical_update_is_idempotent() {
    let h = Harness::new();
    let patron = h.store.add_patron(TENANT, "Aoi", None).await;
    let main = h.store.add_staff(TENANT, "Kei", None).await;
    let help = h.store.add_staff(TENANT, "Sora", None).await;
    let id = h.create_at("2024-05-01T22:00:00+09:00", vec![]).await;

    let update = UpdateSessionCommand {
        patron_ids: Some(vec![patron]),
        primary_staff_id: FieldUpdate::Set(main),
        support_staff_ids: Some(vec![help]),
        ..UpdateSessionCommand::new(TENANT, id)
    };

    let first = h.update.handle(update.clone()).await.unwrap();
    let patrons_after_first = h.store.patron_links(id).await;
    let staff_after_first = h.store.staff_links(id).await;

    let second = h.update.handle(update).await.unwrap();

    assert_eq!(h.store.patron_links(id).await, patrons_after_first);
    assert_eq!(h.store.staff_links(id).await, staff_after_first);
    assert_eq!(first.patrons, second.patrons);
    assert_eq!(first.primary, second.primary);
    assert_eq!(first.support, second.support);
}

#[tokio::test]
async fn memo_only_update_keeps_links() {
    let h = Harness::new();
    let patron = h.store.add_patron(TENANT, "Aoi", None).await;
    let main = h.store.add_staff(TENANT, "Kei", None).await;
    let id = h
        .create
        .handle(CreateSessionCommand {
            primary_staff_id: Some(main),
            ..Harness::command("2024-05-01T22:00:00+09:00", vec![patron])
        })
        .await
        .unwrap()
        .view
        .session
        .id();

    let view = h
        .update
        .handle(UpdateSessionCommand {
            memo: FieldUpdate::Set("regular table".to_string()),
            ..UpdateSessionCommand::new(TENANT, id)
        })
        .await
        .unwrap();

    assert_eq!(view.session.memo(), Some("regular table"));
    assert_eq!(view.patrons.len(), 1);
    assert_eq!(view.primary.map(|s| s.id), Some(main));
    assert_eq!(h.store.patron_links(id).await.len(), 1);
    assert_eq!(h.store.staff_links(id).await.len(), 1);
}

#[tokio::test]
async fn foreign_primary_staff_clears_slot_without_error() {
    let h = Harness::new();
    let main = h.store.add_staff(TENANT, "Kei", None).await;
    let foreign = h.store.add_staff(OTHER_TENANT, "Yuu", None).await;
    let id = h
        .create
        .handle(CreateSessionCommand {
            primary_staff_id: Some(main),
            ..Harness::command("2024-05-01T22:00:00+09:00", vec![])
        })
        .await
        .unwrap()
        .view
        .session
        .id();

    let view = h
        .update
        .handle(UpdateSessionCommand {
            primary_staff_id: FieldUpdate::Set(foreign),
            ..UpdateSessionCommand::new(TENANT, id)
        })
        .await
        .unwrap();

    assert!(view.primary.is_none());
    assert!(h
        .store
        .staff_links(id)
        .await
        .iter()
        .all(|l| l.role != StaffRole::Primary));
}

#[tokio::test]
async fn unknown_staff_id_behaves_like_foreign() {
    let h = Harness::new();
    let id = h.create_at("2024-05-01T22:00:00+09:00", vec![]).await;

    let view = h
        .update
        .handle(UpdateSessionCommand {
            primary_staff_id: FieldUpdate::Set(StaffId::new(99)),
            support_staff_ids: Some(vec![StaffId::new(98)]),
            ..UpdateSessionCommand::new(TENANT, id)
        })
        .await
        .unwrap();

    assert!(view.primary.is_none());
    assert!(view.support.is_empty());
    assert!(h.store.staff_links(id).await.is_empty());
}
