//! Identity validation port for bearer tokens.
//!
//! This port defines the contract for validating access tokens and extracting
//! the acting tenant. It is issuer-agnostic: the HS256 adapter and the mock
//! used in tests both implement it.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedTenant};

/// Validates access tokens and extracts tenant identity.
///
/// HTTP middleware uses this to validate Bearer tokens before any handler
/// runs.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::MissingTenant` when no usable tenant id is present
#[async_trait]
pub trait IdentityValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedTenant, AuthError>;
}
