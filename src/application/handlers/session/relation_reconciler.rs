//! RelationReconciler - Replaces a session's link rows slot by slot.

use super::ownership_validator::OwnershipValidator;
use crate::domain::foundation::{DomainError, PatronId, SessionId, StaffId};
use crate::domain::session::{FieldUpdate, LinkPlan, PatronLink, StaffLink, StaffRole};
use crate::ports::SessionTransaction;

/// What the reconciler wrote, per touched slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Accepted patrons when the patron slot was touched.
    pub patrons: Option<Vec<PatronId>>,
    /// Accepted primary when the primary slot was touched.
    pub primary: Option<Option<StaffId>>,
    /// Accepted support staff when the support slot was touched.
    pub support: Option<Vec<StaffId>>,
}

impl ReconcileOutcome {
    /// Accepted patron ids, empty if the slot was untouched.
    pub fn accepted_patrons(&self) -> &[PatronId] {
        self.patrons.as_deref().unwrap_or_default()
    }
}

/// Applies a [`LinkPlan`] inside an open transaction.
///
/// Each touched slot is cleared then rebuilt from the ids that pass the
/// ownership filter, so running the same plan twice leaves the same rows.
#[derive(Debug, Clone, Copy)]
pub struct RelationReconciler {
    validator: OwnershipValidator,
}

impl RelationReconciler {
    pub fn new(validator: OwnershipValidator) -> Self {
        Self { validator }
    }

    pub async fn reconcile<T>(
        &self,
        tx: &mut T,
        session: SessionId,
        plan: &LinkPlan,
    ) -> Result<ReconcileOutcome, DomainError>
    where
        T: SessionTransaction + ?Sized,
    {
        let mut outcome = ReconcileOutcome::default();

        if let Some(requested) = &plan.patrons {
            let accepted = self.validator.accept_patrons(&mut *tx, requested).await?;
            tx.clear_patron_links(session).await?;
            for patron_id in &accepted {
                tx.insert_patron_link(PatronLink {
                    session_id: session,
                    patron_id: *patron_id,
                })
                .await?;
            }
            outcome.patrons = Some(accepted);
        }

        if !plan.primary.is_unchanged() {
            let requested = match &plan.primary {
                FieldUpdate::Set(id) => Some(*id),
                _ => None,
            };
            let accepted = self.validator.accept_primary(&mut *tx, requested).await?;
            tx.clear_staff_links(session, StaffRole::Primary).await?;
            if let Some(staff_id) = accepted {
                tx.insert_staff_link(StaffLink {
                    session_id: session,
                    staff_id,
                    role: StaffRole::Primary,
                })
                .await?;
            }
            outcome.primary = Some(accepted);
        }

        if let Some(requested) = &plan.support {
            let accepted = self.validator.accept_support(&mut *tx, requested).await?;
            tx.clear_staff_links(session, StaffRole::Support).await?;
            for staff_id in &accepted {
                tx.insert_staff_link(StaffLink {
                    session_id: session,
                    staff_id: *staff_id,
                    role: StaffRole::Support,
                })
                .await?;
            }
            outcome.support = Some(accepted);
        }

        tracing::debug!(
            session_id = %session,
            patrons = ?outcome.patrons,
            primary = ?outcome.primary,
            support = ?outcome.support,
            "Reconciled session links"
        );

        Ok(outcome)
    }
}
