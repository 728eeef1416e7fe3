use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Booking, CreateBookingRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BookingCreated {
    pub message: &'static str,
    pub booking: Booking,
}

/// POST /api/bookings - Submit a viewing request for a property
///
/// Expected Input:
/// ```json
/// {
///   "property_id": 12,
///   "customer_name": "Ada Lovelace",
///   "customer_email": "ada@example.com",
///   "booking_date": "2025-06-01",
///   "booking_time": "10:30"
/// }
/// ```
///
/// `status` and `created_at` come from column defaults and are returned in
/// the created row.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> ApiResult<BookingCreated> {
    let Json(request) = payload?;
    let new = request.validate()?;

    let booking = state.records.insert_booking(&new).await?;
    tracing::info!(
        "Booking {:?} created for property {}",
        booking.id(),
        new.property_id
    );

    Ok(ApiResponse::created(BookingCreated {
        message: "Booking created successfully!",
        booking,
    }))
}
