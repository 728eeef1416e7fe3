use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::models::Identity;
use crate::state::AppState;

/// Bearer authentication middleware: resolves the token with the remote auth
/// service and injects the caller's `Identity` into the request.
///
/// A missing or malformed header is 401; a token the remote refuses is 403.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).map_err(ApiError::unauthorized)?;

    let user = state.auth.user_for_token(&token).await.map_err(|e| {
        tracing::warn!("Bearer token rejected: {}", e);
        ApiError::forbidden("Invalid or expired token")
    })?;

    tracing::debug!("Authenticated request for user {}", user.id);
    request.extensions_mut().insert(Identity {
        user,
        access_token: token,
    });

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        let token = token.trim();
        if token.is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
