use serde::{Deserialize, Serialize};

use super::row::table_row;
use super::{present, RowId};
use crate::error::ApiError;

table_row! {
    /// A row of the `bookings` table. `status` and `created_at` are filled by
    /// column defaults on insert.
    Booking
}

impl Booking {
    pub fn id(&self) -> Option<RowId> {
        self.key("id")
    }

    /// The property the booking was made for; a null column gives `None`
    pub fn property_id(&self) -> Option<RowId> {
        self.key("property_id")
    }
}

/// Body of `POST /api/bookings` as submitted by the public booking form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookingRequest {
    pub property_id: Option<RowId>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub booking_date: Option<String>,
    pub booking_time: Option<String>,
}

/// Validated insert payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    pub property_id: RowId,
    pub customer_name: String,
    pub customer_email: String,
    pub booking_date: String,
    pub booking_time: String,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> Result<NewBooking, ApiError> {
        let missing = || ApiError::bad_request("Missing required fields");

        let property_id = self
            .property_id
            .clone()
            .filter(|id| !id.is_blank())
            .ok_or_else(missing)?;

        Ok(NewBooking {
            property_id,
            customer_name: present(&self.customer_name).ok_or_else(missing)?.to_string(),
            customer_email: present(&self.customer_email).ok_or_else(missing)?.to_string(),
            booking_date: present(&self.booking_date).ok_or_else(missing)?.to_string(),
            booking_time: present(&self.booking_time).ok_or_else(missing)?.to_string(),
        })
    }
}

/// Body of `PUT /api/realtor/bookings/:id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingStatusUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl BookingStatusUpdate {
    pub fn validate(&self) -> Result<&str, ApiError> {
        present(&self.status).ok_or_else(|| ApiError::bad_request("Status is required"))
    }
}
