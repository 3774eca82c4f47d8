//! JWT authentication middleware.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Identity of the caller, taken from a verified token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthPrincipal {
    pub user_id: i64,
    pub role_id: i64,
}

/// Handlers behind [`auth_middleware`] receive the principal as an argument.
#[async_trait]
impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthPrincipal>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

/// Token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix(BEARER_TOKEN_PREFIX)?.trim();
    (!token.is_empty() && !token.contains(' ')).then_some(token)
}

/// JWT authentication middleware.
///
/// Validates the bearer token, then injects the [`AuthPrincipal`] into
/// the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    request.extensions_mut().insert(AuthPrincipal {
        user_id: claims.user_id,
        role_id: claims.role_id,
    });

    Ok(next.run(request).await)
}
