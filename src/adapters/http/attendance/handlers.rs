//! HTTP handlers for attendance endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::session_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::attendance::{ListAttendanceHandler, ListAttendanceQuery};
use crate::domain::foundation::PatronId;

use super::dto::{AttendanceResponse, ListAttendanceParams};

#[derive(Clone)]
pub struct AttendanceHandlers {
    list_handler: Arc<ListAttendanceHandler>,
}

impl AttendanceHandlers {
    pub fn new(list_handler: Arc<ListAttendanceHandler>) -> Self {
        Self { list_handler }
    }
}

/// GET /api/v1/visit
pub async fn list_attendance(
    State(handlers): State<AttendanceHandlers>,
    RequireAuth(tenant): RequireAuth,
    Query(params): Query<ListAttendanceParams>,
) -> Response {
    let query = ListAttendanceQuery {
        tenant_id: tenant.tenant_id,
        patron_id: params.hime_id.map(PatronId::new),
    };

    match handlers.list_handler.handle(query).await {
        Ok(views) => {
            let response: Vec<AttendanceResponse> = views.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => session_error_response(e),
    }
}
