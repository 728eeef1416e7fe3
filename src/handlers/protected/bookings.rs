use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};

use crate::auth::{explain_unmatched_booking, owned_booking};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Booking, BookingStatusUpdate, Identity, Property, RowId};
use crate::state::AppState;

/// GET /api/realtor/bookings - Bookings on any property the caller owns
///
/// Two reads: the caller's property ids, then the bookings referencing them.
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
) -> ApiResult<Vec<Booking>> {
    let property_ids: Vec<RowId> = state
        .records
        .properties_of(&caller)
        .await?
        .iter()
        .filter_map(Property::id)
        .collect();

    if property_ids.is_empty() {
        return Ok(ApiResponse::success(Vec::new()));
    }

    let bookings = state.records.bookings_for(&caller, &property_ids).await?;
    Ok(ApiResponse::success(bookings))
}

/// PUT /api/realtor/bookings/:id - Change a booking's status
///
/// Expected Input:
/// ```json
/// { "status": "confirmed" }
/// ```
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<Identity>,
    Path(id): Path<String>,
    payload: Result<Json<BookingStatusUpdate>, JsonRejection>,
) -> ApiResult<Booking> {
    let id = RowId::parse(&id);
    let records = state.records.as_ref();

    let Json(update) = payload?;
    let status = update.validate()?;

    let (_, property_id) = owned_booking(records, &caller, &id).await?;

    match records
        .update_booking_status(&caller, &id, &property_id, status)
        .await?
    {
        Some(booking) => {
            tracing::info!("Booking {} set to '{}' by {}", id, status, caller.id());
            Ok(ApiResponse::success(booking))
        }
        None => Err(explain_unmatched_booking(records, &caller, &id).await),
    }
}
