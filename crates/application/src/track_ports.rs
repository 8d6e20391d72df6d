use async_trait::async_trait;

use himig_core::AppResult;
use himig_domain::{NewTrack, Track, TrackId};

/// Repository port for generated tracks.
///
/// Every read and write is scoped to the owning subject; tracks belonging to
/// other users behave as if they do not exist.
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// Persists a freshly generated track and returns the stored record.
    async fn save_track(&self, track: NewTrack) -> AppResult<Track>;

    /// Lists the owner's tracks, newest first.
    async fn list_tracks_for_owner(&self, owner_subject: &str) -> AppResult<Vec<Track>>;

    /// Sets the favorite flag and returns the updated record.
    async fn set_favorite(
        &self,
        owner_subject: &str,
        track_id: TrackId,
        is_favorite: bool,
    ) -> AppResult<Track>;

    /// Increments the play counter and returns the updated record.
    async fn increment_play_count(&self, owner_subject: &str, track_id: TrackId)
    -> AppResult<Track>;
}
