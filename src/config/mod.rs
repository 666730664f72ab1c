//! Application configuration
//!
//! Values come from environment variables prefixed with `HOSTNOTE`, with `__`
//! separating nested sections. A `.env` file is read first when present.
//!
//! ```no_run
//! use hostnote::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Bearer token verification
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// - `HOSTNOTE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HOSTNOTE__DATABASE__URL=...` -> `database.url = ...`
    /// - `HOSTNOTE__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HOSTNOTE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
