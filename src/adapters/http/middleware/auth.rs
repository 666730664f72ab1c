//! Authentication middleware and extractor.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedTenant in extensions
//!                                      ↓
//!                              Handler → RequireAuth reads it back
//! ```
//!
//! The middleware only rejects tokens that are present and invalid. Requests
//! with no token pass through, and `RequireAuth` turns them away, so public
//! routes such as the health check can share the stack.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedTenant};
use crate::ports::IdentityValidator;

pub type AuthState = Arc<dyn IdentityValidator>;

/// Validates `Authorization: Bearer <token>` and injects the tenant.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(tenant) => {
            request.extensions_mut().insert(tenant);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "Rejected bearer token");
            let message = match e {
                AuthError::TokenExpired => "Token expired",
                AuthError::InvalidToken => "Invalid token",
                AuthError::MissingTenant => "Token carries no tenant",
            };
            ErrorResponse::unauthorized(message).into_response_with(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Extractor for the acting tenant; 401 when the middleware injected none.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedTenant);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedTenant>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => ErrorResponse::unauthorized("Authentication required")
                .into_response_with(StatusCode::UNAUTHORIZED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockIdentityValidator;
    use crate::domain::foundation::TenantId;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(RequireAuth(tenant): RequireAuth) -> String {
        tenant.tenant_id.to_string()
    }

    fn app() -> Router {
        let validator: AuthState = Arc::new(MockIdentityValidator::new().with_test_tenant("good", 7));
        Router::new()
            .route("/me", get(whoami))
            .layer(middleware::from_fn_with_state(validator, auth_middleware))
    }

    fn request(auth: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri("/me");
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let response = app().oneshot(request(Some("Bearer good"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"7");
    }

    #[tokio::test]
    async fn invalid_token_is_401() {
        let response = app().oneshot(request(Some("Bearer bad"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_token_is_rejected_by_extractor() {
        let response = app().oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app().oneshot(request(Some("Basic dXNlcjpwYXNz"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn require_auth_reads_extensions() {
        let mut request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/").body(()).unwrap();
        request
            .extensions_mut()
            .insert(AuthenticatedTenant::new(TenantId::new(3), None));
        let (mut parts, _) = request.into_parts();

        let RequireAuth(tenant) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(tenant.tenant_id, TenantId::new(3));
    }

    #[test]
    fn rejection_is_401() {
        assert_eq!(
            AuthRejection::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
