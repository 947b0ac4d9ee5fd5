//! HTTP adapters - REST API implementation.
//!
//! [`build_router`] assembles the open profile routes, the optional `/auth`
//! routes, and the shared tower layers.

pub mod middleware;
pub mod profile;

pub use profile::ProfileAppState;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use middleware::{auth_middleware, AuthState};
use profile::{auth_profile_routes, health, profile_routes};

/// Build the application router.
///
/// The `/auth` routes are mounted only when a validator is supplied.
pub fn build_router(state: ProfileAppState, auth: Option<AuthState>, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .merge(profile_routes());

    match auth {
        Some(validator) => {
            router = router.nest(
                "/auth",
                auth_profile_routes().layer(axum::middleware::from_fn_with_state(
                    validator,
                    auth_middleware,
                )),
            );
        }
        None => tracing::info!("auth not configured; /auth routes disabled"),
    }

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&server.cors_origins_list()))
            .layer(TimeoutLayer::new(server.request_timeout())),
    )
}

/// Permissive when no origins are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
