use std::any::Any;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{CorsOrigins, SecurityConfig};
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::require_identity;
use crate::state::AppState;

/// Build the full HTTP router
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes());

    if state.config.api.dashboard_enabled {
        router = router.merge(dashboard_routes(state.clone()));
    }

    router
        // Global middleware
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(public::properties::list))
        .route("/api/bookings", post(public::bookings::create))
        .route("/api/auth/login", post(public::auth::login))
        .route("/api/auth/signup", post(public::auth::signup))
}

fn dashboard_routes(state: AppState) -> Router<AppState> {
    use protected::{bookings, profile, properties};

    Router::new()
        .route("/api/profile", get(profile::get).put(profile::update))
        .route(
            "/api/realtor/properties",
            get(properties::list).post(properties::create),
        )
        .route(
            "/api/realtor/properties/:id",
            put(properties::update).delete(properties::delete),
        )
        .route("/api/realtor/bookings", get(bookings::list))
        .route("/api/realtor/bookings/:id", put(bookings::update))
        // route_layer so unknown paths stay 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state, require_identity))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match &security.cors_origins {
        CorsOrigins::Any => layer.allow_origin(AllowOrigin::any()),
        CorsOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            layer
                .allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
        }
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);
    ApiError::internal("Internal server error").into_response()
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "realty-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "properties": "/api/properties (public)",
            "bookings": "/api/bookings (public)",
            "auth": "/api/auth/login, /api/auth/signup (public)",
            "profile": "/api/profile (bearer)",
            "realtor": "/api/realtor/properties[/:id], /api/realtor/bookings[/:id] (bearer)",
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
