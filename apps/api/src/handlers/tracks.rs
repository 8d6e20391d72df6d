use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use himig_core::UserIdentity;
use himig_domain::TrackId;

use crate::dto::{TrackEnvelopeResponse, TrackListResponse, TrackResponse, UpdateFavoriteRequest};
use crate::error::ApiResult;
use crate::state::AppState;

use super::json_body;

pub async fn list_tracks_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<TrackListResponse>> {
    let tracks = state
        .track_service
        .list_tracks(&user)
        .await?
        .into_iter()
        .map(TrackResponse::from)
        .collect();

    Ok(Json(TrackListResponse {
        success: true,
        tracks,
    }))
}

pub async fn update_favorite_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(track_id): Path<String>,
    payload: Result<Json<UpdateFavoriteRequest>, JsonRejection>,
) -> ApiResult<Json<TrackEnvelopeResponse>> {
    let track_id = track_id.parse::<TrackId>()?;
    let payload = json_body(payload)?;

    let track = state
        .track_service
        .set_favorite(&user, track_id, payload.is_favorite)
        .await?;

    Ok(Json(TrackEnvelopeResponse::from(track)))
}

pub async fn record_play_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(track_id): Path<String>,
) -> ApiResult<Json<TrackEnvelopeResponse>> {
    let track_id = track_id.parse::<TrackId>()?;
    let track = state.track_service.record_play(&user, track_id).await?;

    Ok(Json(TrackEnvelopeResponse::from(track)))
}
