// handlers/mod.rs - two tiers of handlers
//
// Public (no auth) → Protected (bearer token resolved by the remote auth
// service, plus per-resource ownership checks on writes)
pub mod protected; // /api/profile, /api/realtor/*
pub mod public; // /api/properties, /api/bookings, /api/auth/*
