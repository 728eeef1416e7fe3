use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Property;
use crate::state::AppState;

/// GET /api/properties - Every listed property
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Property>> {
    let properties = state.records.list_properties().await?;
    Ok(ApiResponse::success(properties))
}
