use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Identity, Profile, ProfileFields};
use crate::state::AppState;

/// GET /api/profile - The caller's realtor profile
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
) -> ApiResult<Profile> {
    let profile = state
        .records
        .profile(&caller)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    Ok(ApiResponse::success(profile))
}

/// PUT /api/profile - Update name, company name and/or email
///
/// Only the fields present in the body are written.
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    payload: Result<Json<ProfileFields>, JsonRejection>,
) -> ApiResult<Profile> {
    let Json(fields) = payload?;

    let updated = if fields == ProfileFields::default() {
        state.records.profile(&caller).await?
    } else {
        state.records.update_profile(&caller, &fields).await?
    };

    let profile = updated.ok_or_else(|| ApiError::not_found("Profile not found"))?;
    Ok(ApiResponse::success(profile))
}
