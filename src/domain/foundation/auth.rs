//! Authentication types for the domain layer.
//!
//! These types represent the acting tenant extracted from a bearer token.
//! They have **no external dependencies** - any token issuer can populate them
//! via the `IdentityValidator` port.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token validation:
//! let tenant = AuthenticatedTenant::new(TenantId::new(12), Some("host-12".to_string()));
//!
//! // Inject into request extensions for handlers to use
//! request.extensions_mut().insert(tenant);
//! ```

use super::TenantId;
use thiserror::Error;

/// Tenant identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedTenant {
    /// The owning account every read and write is scoped to.
    pub tenant_id: TenantId,

    /// Login name if the token carried one.
    pub username: Option<String>,
}

impl AuthenticatedTenant {
    /// Creates a new authenticated tenant.
    pub fn new(tenant_id: TenantId, username: Option<String>) -> Self {
        Self {
            tenant_id,
            username,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Signature is valid but the claims carry no usable tenant id.
    #[error("Token carries no tenant identity")]
    MissingTenant,
}

impl AuthError {
    /// Returns true if this error indicates the client should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
