use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use himig_core::UserIdentity;
use himig_domain::GenerationRequest;

use crate::dto::{GenerateTrackRequest, TrackEnvelopeResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::json_body;

pub async fn generate_track_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    payload: Result<Json<GenerateTrackRequest>, JsonRejection>,
) -> ApiResult<Json<TrackEnvelopeResponse>> {
    let payload = json_body(payload)?;

    let request = GenerationRequest::new(
        payload.prompt,
        payload.genre,
        payload.mood,
        duration_seconds(payload.duration.as_ref()),
    )?;

    let track = state.generation_service.generate_track(&user, request).await?;

    Ok(Json(TrackEnvelopeResponse::from(track)))
}

/// Whole-second duration from the request body. Missing or fractional values
/// map to zero so they are reported as an out-of-range duration.
fn duration_seconds(duration: Option<&serde_json::Number>) -> i64 {
    let Some(duration) = duration else {
        return 0;
    };

    if let Some(seconds) = duration.as_i64() {
        return seconds;
    }

    match duration.as_f64() {
        // Float-to-int casts saturate, so huge values stay out of range.
        Some(seconds) if seconds.is_finite() && seconds.fract() == 0.0 => seconds as i64,
        _ => 0,
    }
}
