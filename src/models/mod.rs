pub mod booking;
pub mod id;
pub mod identity;
pub mod profile;
pub mod property;
pub mod row;

pub use booking::{Booking, BookingStatusUpdate, CreateBookingRequest, NewBooking};
pub use id::RowId;
pub use identity::{AuthSession, Identity, Session, User};
pub use profile::{Profile, ProfileFields};
pub use property::{NewProperty, Property, PropertyFields};
pub use row::Row;

/// Treat absent and blank strings alike, the way a form submission would
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
