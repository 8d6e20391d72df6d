use axum::http::HeaderName;
use himig_application::{GenerationService, RateLimitService, TrackLibraryService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rate_limit_service: RateLimitService,
    pub generation_service: GenerationService,
    pub track_service: TrackLibraryService,
    pub identity_header: HeaderName,
}
