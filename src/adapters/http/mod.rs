//! HTTP adapters - REST API under `/api/v1`.
//!
//! Each resource has its own `dto`/`handlers`/`routes` module; `router`
//! assembles them behind the auth middleware.

pub mod attendance;
pub mod error;
pub mod middleware;
pub mod router;
pub mod session;

pub use error::ErrorResponse;
pub use router::{api_router, AppState};
