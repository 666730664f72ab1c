//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{
    invalid_id_response, json_rejection_response, session_error_response,
};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::session::{
    CreateSessionHandler, DeleteSessionCommand, DeleteSessionHandler, GetSessionHandler,
    GetSessionQuery, ListSessionsHandler, ListSessionsQuery, UpdateSessionHandler,
};
use crate::domain::foundation::SessionId;

use super::dto::{ListSessionsParams, MessageResponse, SessionRequest, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    create_handler: Arc<CreateSessionHandler>,
    update_handler: Arc<UpdateSessionHandler>,
    delete_handler: Arc<DeleteSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    list_handler: Arc<ListSessionsHandler>,
}

impl SessionHandlers {
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        update_handler: Arc<UpdateSessionHandler>,
        delete_handler: Arc<DeleteSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        list_handler: Arc<ListSessionsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            delete_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/table
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(tenant): RequireAuth,
    body: Result<Json<SessionRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(rejection),
    };

    match handlers
        .create_handler
        .handle(req.into_create(tenant.tenant_id))
        .await
    {
        Ok(result) => {
            let response: SessionResponse = result.view.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// GET /api/v1/table
pub async fn list_sessions(
    State(handlers): State<SessionHandlers>,
    RequireAuth(tenant): RequireAuth,
    Query(params): Query<ListSessionsParams>,
) -> Response {
    let query = ListSessionsQuery {
        tenant_id: tenant.tenant_id,
        options: params.into(),
    };

    match handlers.list_handler.handle(query).await {
        Ok(views) => {
            let response: Vec<SessionResponse> = views.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// GET /api/v1/table/:id
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(tenant): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id_response("session");
    };

    let query = GetSessionQuery {
        tenant_id: tenant.tenant_id,
        session_id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// PUT /api/v1/table/:id
pub async fn update_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(tenant): RequireAuth,
    Path(session_id): Path<String>,
    body: Result<Json<SessionRequest>, JsonRejection>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id_response("session");
    };
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => return json_rejection_response(rejection),
    };

    match handlers
        .update_handler
        .handle(req.into_update(tenant.tenant_id, session_id))
        .await
    {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// DELETE /api/v1/table/:id
pub async fn delete_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(tenant): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_id_response("session");
    };

    let cmd = DeleteSessionCommand {
        tenant_id: tenant.tenant_id,
        session_id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => {
            let response = MessageResponse {
                message: "Deleted".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}
