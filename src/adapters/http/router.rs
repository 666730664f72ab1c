//! Top-level router: `/api/v1` routes plus the tower-http middleware stack.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::attendance::ListAttendanceHandler;
use crate::application::handlers::session::{
    CreateSessionHandler, DeleteSessionHandler, GetSessionHandler, ListSessionsHandler,
    SessionHydrator, UpdateSessionHandler,
};
use crate::config::ServerConfig;
use crate::ports::{AttendanceReader, DirectoryReader, SessionReader, SessionStore};

use super::attendance::{attendance_routes, AttendanceHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::session::{session_routes, SessionHandlers};

/// Everything the routes need, wired from the persistence ports.
#[derive(Clone)]
pub struct AppState {
    sessions: SessionHandlers,
    attendance: AttendanceHandlers,
    validator: AuthState,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SessionStore>,
        reader: Arc<dyn SessionReader>,
        directory: Arc<dyn DirectoryReader>,
        attendance: Arc<dyn AttendanceReader>,
        validator: AuthState,
    ) -> Self {
        let hydrator = Arc::new(SessionHydrator::new(reader.clone(), directory.clone()));

        let sessions = SessionHandlers::new(
            Arc::new(CreateSessionHandler::new(store.clone(), hydrator.clone())),
            Arc::new(UpdateSessionHandler::new(store.clone(), hydrator.clone())),
            Arc::new(DeleteSessionHandler::new(store)),
            Arc::new(GetSessionHandler::new(reader.clone(), hydrator.clone())),
            Arc::new(ListSessionsHandler::new(reader, hydrator)),
        );
        let attendance =
            AttendanceHandlers::new(Arc::new(ListAttendanceHandler::new(attendance, directory)));

        Self {
            sessions,
            attendance,
            validator,
        }
    }

    /// Wires every port to one adapter that implements all of them.
    pub fn from_store<S>(store: Arc<S>, validator: AuthState) -> Self
    where
        S: SessionStore + SessionReader + DirectoryReader + AttendanceReader + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            validator,
        )
    }
}

pub fn api_router(state: AppState, config: &ServerConfig) -> Router {
    let protected = Router::new()
        .nest("/table", session_routes(state.sessions))
        .nest("/visit", attendance_routes(state.attendance))
        .layer(middleware::from_fn_with_state(
            state.validator,
            auth_middleware,
        ));

    let api = protected.route("/health", get(health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// GET /api/v1/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() && !config.is_production() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
