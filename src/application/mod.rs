//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers own the write transaction; query handlers read through
//! the reader ports and hydrate.

pub mod handlers;

pub use handlers::attendance::{ListAttendanceHandler, ListAttendanceQuery};
pub use handlers::session::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, DeleteSessionCommand,
    DeleteSessionHandler, GetSessionHandler, GetSessionQuery, ListSessionsHandler,
    ListSessionsQuery, SessionHydrator, UpdateSessionCommand, UpdateSessionHandler,
};
