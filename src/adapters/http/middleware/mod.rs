//! HTTP middleware for axum.
//!
//! - `auth` - bearer token validation and the `RequireAuth` extractor

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth};
