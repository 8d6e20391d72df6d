use chrono::SecondsFormat;
use himig_domain::Track;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Incoming payload for music generation.
///
/// Missing text fields deserialize as empty so they surface as validation
/// messages rather than a body error.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/generate-track-request.ts"
)]
pub struct GenerateTrackRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    #[ts(type = "number")]
    pub duration: Option<serde_json::Number>,
}

/// API representation of a generated track.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/track-response.ts"
)]
pub struct TrackResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub prompt: String,
    pub genre: String,
    pub mood: String,
    pub duration: u32,
    pub audio_url: String,
    pub is_favorite: bool,
    pub play_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Track> for TrackResponse {
    fn from(value: Track) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.owner_subject,
            title: value.title,
            prompt: value.prompt,
            genre: value.genre,
            mood: value.mood,
            duration: value.duration_seconds,
            audio_url: value.audio_url,
            is_favorite: value.is_favorite,
            play_count: value.play_count,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: value.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Response carrying a single track.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/track-envelope-response.ts"
)]
pub struct TrackEnvelopeResponse {
    pub success: bool,
    pub track: TrackResponse,
}

impl From<Track> for TrackEnvelopeResponse {
    fn from(value: Track) -> Self {
        Self {
            success: true,
            track: TrackResponse::from(value),
        }
    }
}

/// Response listing the caller's tracks, newest first.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/track-list-response.ts"
)]
pub struct TrackListResponse {
    pub success: bool,
    pub tracks: Vec<TrackResponse>,
}

/// Incoming payload for toggling a track favorite.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-favorite-request.ts"
)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFavoriteRequest {
    pub is_favorite: bool,
}
