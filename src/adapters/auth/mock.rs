//! Mock identity validator for tests.
//!
//! ```ignore
//! use hostnote::adapters::auth::MockIdentityValidator;
//!
//! let validator = MockIdentityValidator::new().with_test_tenant("valid-token", 7);
//! let tenant = validator.validate("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedTenant, TenantId};
use crate::ports::IdentityValidator;

/// Maps fixed tokens to tenants. Unknown tokens return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockIdentityValidator {
    tokens: RwLock<HashMap<String, AuthenticatedTenant>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockIdentityValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenant(self, token: impl Into<String>, tenant: AuthenticatedTenant) -> Self {
        self.add_token(token, tenant);
        self
    }

    /// Registers `token` for tenant `id` with a generated username.
    pub fn with_test_tenant(self, token: impl Into<String>, id: i64) -> Self {
        let tenant = AuthenticatedTenant::new(TenantId::new(id), Some(format!("host-{}", id)));
        self.with_tenant(token, tenant)
    }

    /// Every validation returns `error` until `clear_error` is called.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn add_token(&self, token: impl Into<String>, tenant: AuthenticatedTenant) {
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), tenant);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(token);
    }
}

#[async_trait]
impl IdentityValidator for MockIdentityValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedTenant, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_tenant() {
        let validator = MockIdentityValidator::new().with_test_tenant("tok", 7);
        let tenant = validator.validate("tok").await.unwrap();
        assert_eq!(tenant.tenant_id, TenantId::new(7));
        assert_eq!(tenant.username.as_deref(), Some("host-7"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockIdentityValidator::new();
        assert_eq!(validator.validate("nope").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins_until_cleared() {
        let validator = MockIdentityValidator::new()
            .with_test_tenant("tok", 1)
            .with_error(AuthError::TokenExpired);
        assert_eq!(validator.validate("tok").await, Err(AuthError::TokenExpired));

        validator.clear_error();
        assert!(validator.validate("tok").await.is_ok());
    }

    #[tokio::test]
    async fn removed_token_stops_validating() {
        let validator = MockIdentityValidator::new().with_test_tenant("tok", 1);
        validator.remove_token("tok");
        assert_eq!(validator.validate("tok").await, Err(AuthError::InvalidToken));
    }
}
