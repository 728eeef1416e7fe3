// handlers/protected/mod.rs - Realtor dashboard handlers
//
// Mounted behind `require_identity`; every handler receives the caller's
// `Identity` as a request extension. Writes on properties and bookings go
// through the ownership guard in `crate::auth`.
pub mod bookings;
pub mod profile;
pub mod properties;
