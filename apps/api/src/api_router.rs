use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, patch, post};
use himig_application::RateLimitPolicy;
use himig_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;


/// Rate limit policies applied to each route group.
#[derive(Debug, Clone)]
pub struct RoutePolicies {
    pub generation: RateLimitPolicy,
    pub api: RateLimitPolicy,
}

impl Default for RoutePolicies {
    fn default() -> Self {
        Self {
            generation: RateLimitPolicy::generation(),
            api: RateLimitPolicy::api(),
        }
    }
}

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    policies: RoutePolicies,
) -> Result<Router, AppError> {
    // Route layers run bottom-up: the limiter sees every request, identity is
    // checked only for admitted ones.
    let generation_routes = Router::new()
        .route(
            "/api/generate",
            post(handlers::generation::generate_track_handler),
        )
        .route_layer(from_fn(middleware::require_identity))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::rate_limit,
        ))
        .layer(axum::Extension(policies.generation))
        .layer(cors::build_generation_cors_layer());

    let library_routes = Router::new()
        .route("/api/tracks", get(handlers::tracks::list_tracks_handler))
        .route(
            "/api/tracks/{track_id}/favorite",
            patch(handlers::tracks::update_favorite_handler),
        )
        .route(
            "/api/tracks/{track_id}/play",
            post(handlers::tracks::record_play_handler),
        )
        .route_layer(from_fn(middleware::require_identity))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::rate_limit,
        ))
        .layer(axum::Extension(policies.api))
        .layer(cors::build_library_cors_layer(frontend_url)?);

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(generation_routes)
        .merge(library_routes)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_identity,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
