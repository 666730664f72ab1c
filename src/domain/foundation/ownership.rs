//! Ownership trait for tenant-owned resources.
//!
//! Every persisted entity belongs to exactly one tenant. Implementors expose
//! that tenant so scoping checks read the same everywhere.
//!
//! ```ignore
//! impl OwnedByTenant for Session {
//!     fn tenant_id(&self) -> TenantId {
//!         self.tenant_id
//!     }
//! }
//!
//! if !session.is_owned_by(tenant) { /* treat as not found */ }
//! ```

use super::TenantId;

/// Trait for entities that have a single owning tenant.
pub trait OwnedByTenant {
    /// Returns the tenant that owns this resource.
    fn tenant_id(&self) -> TenantId;

    /// Checks if the given tenant is the owner.
    fn is_owned_by(&self, tenant: TenantId) -> bool {
        self.tenant_id() == tenant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        owner: TenantId,
    }

    impl OwnedByTenant for TestResource {
        fn tenant_id(&self) -> TenantId {
            self.owner
        }
    }

    #[test]
    fn owner_matches() {
        let resource = TestResource {
            owner: TenantId::new(1),
        };
        assert!(resource.is_owned_by(TenantId::new(1)));
    }

    #[test]
    fn other_tenant_does_not_match() {
        let resource = TestResource {
            owner: TenantId::new(1),
        };
        assert!(!resource.is_owned_by(TenantId::new(2)));
    }
}
