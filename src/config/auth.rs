//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HMAC key length accepted in production.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Bearer token configuration (HS256)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC key tokens are signed with
    pub jwt_secret: SecretString,

    /// Expected `iss` claim, if tokens carry one
    pub issuer: Option<String>,

    /// Clock skew tolerated when checking `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Creates a config with the given secret and defaults elsewhere.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(secret.into()),
            issuer: None,
            leeway_secs: default_leeway(),
        }
    }

    /// Get leeway as Duration
    pub fn leeway(&self) -> Duration {
        Duration::from_secs(self.leeway_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires a key of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::with_secret("dev-secret");
        assert_eq!(config.leeway(), Duration::from_secs(30));
        assert!(config.issuer.is_none());
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthConfig::with_secret("");
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_production_requires_long_secret() {
        let config = AuthConfig::with_secret("short");
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::WeakJwtSecret)
        ));

        let config = AuthConfig::with_secret("x".repeat(32));
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let config = AuthConfig::with_secret("do-not-print");
        assert!(!format!("{:?}", config).contains("do-not-print"));
    }
}
