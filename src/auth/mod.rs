//! Ownership guard applied by the realtor dashboard handlers before a write.
//!
//! The guard reads the resource, compares its owner to the caller, and only
//! then lets the handler issue a write. The write itself is filtered on the
//! same owner, so a row that changed hands in between is left untouched;
//! `explain_*` turns such an unmatched write back into 404 or 403.

use crate::error::ApiError;
use crate::models::{Booking, Identity, Property, RowId};
use crate::store::RecordStore;

pub async fn owned_property(
    records: &dyn RecordStore,
    caller: &Identity,
    id: &RowId,
) -> Result<Property, ApiError> {
    let property = records
        .find_property(caller, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    if !property.is_owned_by(caller.id()) {
        tracing::warn!(
            "User {} attempted to modify property {} owned by {:?}",
            caller.id(),
            id,
            property.realtor_id()
        );
        return Err(ApiError::forbidden("Unauthorized"));
    }

    Ok(property)
}

/// Bookings are owned through the property they reference. Returns the
/// booking with the verified property id; a booking without a property
/// belongs to nobody.
pub async fn owned_booking(
    records: &dyn RecordStore,
    caller: &Identity,
    id: &RowId,
) -> Result<(Booking, RowId), ApiError> {
    let booking = records
        .find_booking(caller, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Booking not found"))?;

    let Some(property_id) = booking.property_id() else {
        tracing::warn!(
            "User {} attempted to modify booking {} with no property",
            caller.id(),
            id
        );
        return Err(ApiError::forbidden("Unauthorized"));
    };
    owned_property(records, caller, &property_id).await?;

    Ok((booking, property_id))
}

pub async fn explain_unmatched_property(
    records: &dyn RecordStore,
    caller: &Identity,
    id: &RowId,
) -> ApiError {
    match owned_property(records, caller, id).await {
        Err(e) => e,
        Ok(_) => ApiError::upstream(format!("Property {} was not modified", id)),
    }
}

pub async fn explain_unmatched_booking(
    records: &dyn RecordStore,
    caller: &Identity,
    id: &RowId,
) -> ApiError {
    match owned_booking(records, caller, id).await {
        Err(e) => e,
        Ok(_) => ApiError::upstream(format!("Booking {} was not modified", id)),
    }
}
