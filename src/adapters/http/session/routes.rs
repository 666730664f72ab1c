//! HTTP routes for session endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_session, delete_session, get_session, list_sessions, update_session, SessionHandlers,
};

/// Session routes, mounted at `/table`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route(
            "/:id",
            get(get_session).put(update_session).delete(delete_session),
        )
        .with_state(handlers)
}
