//! OwnershipValidator - Filter stage for referenced patron and staff ids.
//!
//! A foreign, missing, soft-deleted or non-positive id is dropped, never
//! reported. Only storage failures surface as errors.

use crate::domain::foundation::{DomainError, PatronId, StaffId, TenantId};
use crate::ports::OwnershipLookup;

/// Filters client-supplied ids down to those owned by one tenant.
#[derive(Debug, Clone, Copy)]
pub struct OwnershipValidator {
    tenant: TenantId,
}

impl OwnershipValidator {
    pub fn new(tenant: TenantId) -> Self {
        Self { tenant }
    }

    pub async fn patron_owned<L>(&self, lookup: &mut L, patron: PatronId) -> Result<bool, DomainError>
    where
        L: OwnershipLookup + ?Sized,
    {
        if !patron.is_assignable() {
            return Ok(false);
        }
        lookup.patron_exists(self.tenant, patron).await
    }

    pub async fn staff_owned<L>(&self, lookup: &mut L, staff: StaffId) -> Result<bool, DomainError>
    where
        L: OwnershipLookup + ?Sized,
    {
        if !staff.is_assignable() {
            return Ok(false);
        }
        lookup.staff_exists(self.tenant, staff).await
    }

    /// Owned patrons in first-seen order, without duplicates.
    pub async fn accept_patrons<L>(
        &self,
        lookup: &mut L,
        ids: &[PatronId],
    ) -> Result<Vec<PatronId>, DomainError>
    where
        L: OwnershipLookup + ?Sized,
    {
        let mut accepted = Vec::with_capacity(ids.len());
        for id in dedup_in_order(ids) {
            if self.patron_owned(lookup, id).await? {
                accepted.push(id);
            } else {
                tracing::debug!(tenant_id = %self.tenant, patron_id = %id, "Dropping unowned patron id");
            }
        }
        Ok(accepted)
    }

    /// The primary staff member if present and owned.
    pub async fn accept_primary<L>(
        &self,
        lookup: &mut L,
        id: Option<StaffId>,
    ) -> Result<Option<StaffId>, DomainError>
    where
        L: OwnershipLookup + ?Sized,
    {
        let Some(id) = id else {
            return Ok(None);
        };
        if self.staff_owned(lookup, id).await? {
            Ok(Some(id))
        } else {
            tracing::debug!(tenant_id = %self.tenant, staff_id = %id, "Dropping unowned primary staff id");
            Ok(None)
        }
    }

    /// Owned support staff in first-seen order, without duplicates.
    pub async fn accept_support<L>(
        &self,
        lookup: &mut L,
        ids: &[StaffId],
    ) -> Result<Vec<StaffId>, DomainError>
    where
        L: OwnershipLookup + ?Sized,
    {
        let mut accepted = Vec::with_capacity(ids.len());
        for id in dedup_in_order(ids) {
            if self.staff_owned(lookup, id).await? {
                accepted.push(id);
            } else {
                tracing::debug!(tenant_id = %self.tenant, staff_id = %id, "Dropping unowned support staff id");
            }
        }
        Ok(accepted)
    }
}

fn dedup_in_order<T: Copy + PartialEq>(ids: &[T]) -> Vec<T> {
    let mut seen: Vec<T> = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use async_trait::async_trait;
    use proptest::prelude::*;

    /// Lookup backed by fixed id lists; counts calls.
    struct FixedLookup {
        patrons: Vec<(TenantId, PatronId)>,
        staff: Vec<(TenantId, StaffId)>,
        calls: usize,
        fail: bool,
    }

    impl FixedLookup {
        fn new() -> Self {
            Self {
                patrons: vec![],
                staff: vec![],
                calls: 0,
                fail: false,
            }
        }
    }

    #[async_trait]
    impl OwnershipLookup for FixedLookup {
        async fn patron_exists(
            &mut self,
            tenant: TenantId,
            patron: PatronId,
        ) -> Result<bool, DomainError> {
            self.calls += 1;
            if self.fail {
                return Err(DomainError::new(ErrorCode::DatabaseError, "lookup failed"));
            }
            Ok(self.patrons.contains(&(tenant, patron)))
        }

        async fn staff_exists(
            &mut self,
            tenant: TenantId,
            staff: StaffId,
        ) -> Result<bool, DomainError> {
            self.calls += 1;
            Ok(self.staff.contains(&(tenant, staff)))
        }
    }

    fn t1() -> TenantId {
        TenantId::new(1)
    }

    #[tokio::test]
    async fn non_positive_ids_are_rejected_without_lookup() {
        let mut lookup = FixedLookup::new();
        let validator = OwnershipValidator::new(t1());

        assert!(!validator.patron_owned(&mut lookup, PatronId::new(0)).await.unwrap());
        assert!(!validator.staff_owned(&mut lookup, StaffId::new(-3)).await.unwrap());
        assert_eq!(lookup.calls, 0);
    }

    #[tokio::test]
    async fn foreign_ids_are_filtered_silently() {
        let mut lookup = FixedLookup::new();
        lookup.patrons = vec![(t1(), PatronId::new(5)), (TenantId::new(2), PatronId::new(6))];
        let validator = OwnershipValidator::new(t1());

        let accepted = validator
            .accept_patrons(&mut lookup, &[PatronId::new(6), PatronId::new(5)])
            .await
            .unwrap();
        assert_eq!(accepted, vec![PatronId::new(5)]);
    }

    #[tokio::test]
    async fn duplicates_keep_first_seen_order() {
        let mut lookup = FixedLookup::new();
        lookup.staff = vec![(t1(), StaffId::new(3)), (t1(), StaffId::new(9))];
        let validator = OwnershipValidator::new(t1());

        let accepted = validator
            .accept_support(
                &mut lookup,
                &[StaffId::new(9), StaffId::new(3), StaffId::new(9)],
            )
            .await
            .unwrap();
        assert_eq!(accepted, vec![StaffId::new(9), StaffId::new(3)]);
    }

    #[tokio::test]
    async fn unowned_primary_becomes_none() {
        let mut lookup = FixedLookup::new();
        let validator = OwnershipValidator::new(t1());

        let primary = validator
            .accept_primary(&mut lookup, Some(StaffId::new(4)))
            .await
            .unwrap();
        assert_eq!(primary, None);
    }

    #[tokio::test]
    async fn lookup_failure_propagates() {
        let mut lookup = FixedLookup::new();
        lookup.fail = true;
        let validator = OwnershipValidator::new(t1());

        let result = validator
            .accept_patrons(&mut lookup, &[PatronId::new(1)])
            .await;
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn accepted_patrons_are_owned_unique_subset(
            owned in proptest::collection::vec(1i64..20, 0..10),
            requested in proptest::collection::vec(-5i64..25, 0..20),
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let mut lookup = FixedLookup::new();
            lookup.patrons = owned.iter().map(|id| (t1(), PatronId::new(*id))).collect();
            let requested: Vec<PatronId> = requested.into_iter().map(PatronId::new).collect();

            let accepted = rt
                .block_on(OwnershipValidator::new(t1()).accept_patrons(&mut lookup, &requested))
                .unwrap();

            for (i, id) in accepted.iter().enumerate() {
                prop_assert!(owned.contains(&id.as_i64()));
                prop_assert!(requested.contains(id));
                prop_assert!(!accepted[..i].contains(id));
            }
        }
    }
}
