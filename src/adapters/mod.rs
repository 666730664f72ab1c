//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - bearer token validation (HS256, mock)
//! - `http` - axum REST API
//! - `memory` - in-process persistence for tests and local runs
//! - `postgres` - sqlx persistence

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
