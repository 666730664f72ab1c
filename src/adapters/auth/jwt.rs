//! HS256 bearer token validator.
//!
//! Tokens are signed with a shared secret and carry the tenant as a numeric
//! `userID` claim. `exp` is checked when present; `iss` is checked when an
//! issuer is configured.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedTenant, TenantId};
use crate::ports::IdentityValidator;

#[derive(Debug, Deserialize)]
struct HostClaims {
    #[serde(rename = "userID")]
    user_id: Option<i64>,
    #[serde(default)]
    username: Option<String>,
}

pub struct JwtIdentityValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        // Long-lived tokens omit `exp`; it is still validated when present.
        validation.set_required_spec_claims(&[] as &[&str]);
        validation.validate_exp = true;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityValidator for JwtIdentityValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedTenant, AuthError> {
        let data = decode::<HostClaims>(token, &self.key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        let claims = data.claims;
        let tenant_id = match claims.user_id {
            Some(id) if id > 0 => TenantId::new(id),
            other => {
                tracing::warn!(user_id = ?other, "Token carries no usable userID");
                return Err(AuthError::MissingTenant);
            }
        };

        Ok(AuthenticatedTenant::new(tenant_id, claims.username))
    }
}

impl std::fmt::Debug for JwtIdentityValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityValidator")
            .field("algorithm", &Algorithm::HS256)
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}
