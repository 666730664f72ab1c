//! Authentication adapters implementing `IdentityValidator`.
//!
//! - `jwt` - HS256 tokens signed with the configured shared secret
//! - `mock` - fixed token table for tests

mod jwt;
mod mock;

pub use jwt::JwtIdentityValidator;
pub use mock::MockIdentityValidator;
