//! In-memory persistence adapters.
//!
//! Deterministic stand-ins for the PostgreSQL adapters, used by unit and
//! integration tests and by local runs without a database.

mod state;
mod store;
mod transaction;

pub use state::FailPoint;
pub use store::InMemoryStore;
pub use transaction::MemoryTransaction;
