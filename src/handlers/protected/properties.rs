use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};

use crate::auth::{explain_unmatched_property, owned_property};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Identity, NewProperty, Property, PropertyFields, RowId};
use crate::state::AppState;

/// GET /api/realtor/properties - Properties owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
) -> ApiResult<Vec<Property>> {
    let properties = state.records.properties_of(&caller).await?;
    Ok(ApiResponse::success(properties))
}

/// POST /api/realtor/properties - List a new property owned by the caller
///
/// Expected Input:
/// ```json
/// {
///   "title": "Harbour loft",
///   "location": "Old Town",
///   "price": 450000,
///   "bedrooms": 2,
///   "bathrooms": 1.5,
///   "imageUrl": "https://...",
///   "description": "..."
/// }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    payload: Result<Json<PropertyFields>, JsonRejection>,
) -> ApiResult<Property> {
    let Json(fields) = payload?;

    let new = NewProperty {
        fields,
        realtor_id: caller.id(),
    };
    let property = state.records.insert_property(&caller, &new).await?;
    tracing::info!("Realtor {} listed property {:?}", caller.id(), property.id());

    Ok(ApiResponse::created(property))
}

/// PUT /api/realtor/properties/:id - Update any subset of a property's fields
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    Path(id): Path<String>,
    payload: Result<Json<PropertyFields>, JsonRejection>,
) -> ApiResult<Property> {
    let id = RowId::parse(&id);
    let records = state.records.as_ref();

    let current = owned_property(records, &caller, &id).await?;
    let Json(fields) = payload?;
    if fields.is_empty() {
        return Ok(ApiResponse::success(current));
    }

    match records.update_owned_property(&caller, &id, &fields).await? {
        Some(property) => {
            tracing::debug!("Property {} updated by {}", id, caller.id());
            Ok(ApiResponse::success(property))
        }
        None => Err(explain_unmatched_property(records, &caller, &id).await),
    }
}

/// DELETE /api/realtor/properties/:id - Remove a property owned by the caller
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = RowId::parse(&id);
    let records = state.records.as_ref();

    owned_property(records, &caller, &id).await?;

    if records.delete_owned_property(&caller, &id).await? {
        tracing::info!("Property {} deleted by {}", id, caller.id());
        Ok(ApiResponse::no_content())
    } else {
        Err(explain_unmatched_property(records, &caller, &id).await)
    }
}
