// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Listing browsing, booking requests from visitors, and token acquisition.
// Every input is validated here since no caller context is trusted.
pub mod auth;
pub mod bookings;
pub mod properties;
