use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{present, AuthSession, User};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: User,
}

/// POST /api/auth/login - Exchange email and password for a session
///
/// The password grant runs on the elevated client. A refusal from the auth
/// service is reported as 401 with the service's own message.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthSession> {
    let Json(request) = payload?;

    let (Some(email), Some(password)) = (present(&request.email), request.password.as_deref())
    else {
        return Err(ApiError::bad_request("Email and password are required"));
    };
    if password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let session = state.auth.sign_in(email, password).await.map_err(|e| {
        if e.is_rejection() {
            tracing::warn!("Login refused for {}: {}", email, e);
            ApiError::unauthorized(e.client_message())
        } else {
            e.into()
        }
    })?;

    Ok(ApiResponse::success(session.into()))
}

/// POST /api/auth/signup - Register a realtor account
///
/// Creates a pre-confirmed auth user, then records the company name on the
/// realtor profile row. If the profile write fails the new user is deleted
/// again so no account exists without its profile.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<SignupResponse> {
    let Json(request) = payload?;

    let required = || ApiError::bad_request("Email, password, and company name are required");
    let email = present(&request.email).ok_or_else(required)?;
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(required)?;
    let company_name = present(&request.company_name).ok_or_else(required)?;

    let user = state.auth.create_user(email, password).await.map_err(|e| {
        if e.is_rejection() {
            tracing::warn!("Signup refused for {}: {}", email, e);
            ApiError::bad_request(e.client_message())
        } else {
            ApiError::from(e)
        }
    })?;

    if let Err(e) = state.records.set_company_name(user.id, company_name).await {
        tracing::error!("Signup profile update failed for user {}: {}", user.id, e);
        match state.auth.delete_user(user.id).await {
            Ok(()) => tracing::info!("Rolled back auth user {}", user.id),
            Err(rollback) => tracing::error!(
                "Rollback of auth user {} failed, account is orphaned: {}",
                user.id,
                rollback
            ),
        }
        return Err(ApiError::upstream("User created but profile update failed."));
    }

    tracing::info!("Realtor {} signed up", user.id);
    Ok(ApiResponse::created(SignupResponse { user }))
}
