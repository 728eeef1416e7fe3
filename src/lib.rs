pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod supabase;

pub use config::AppConfig;
pub use routes::app;
pub use state::AppState;

#[cfg(test)]
pub mod testing;
