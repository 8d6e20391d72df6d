use std::sync::Arc;

use himig_core::{AppResult, UserIdentity};
use himig_domain::{Track, TrackId};

use crate::TrackRepository;

/// Application service for a user's personal track library.
#[derive(Clone)]
pub struct TrackLibraryService {
    repository: Arc<dyn TrackRepository>,
}

impl TrackLibraryService {
    /// Creates a new library service.
    #[must_use]
    pub fn new(repository: Arc<dyn TrackRepository>) -> Self {
        Self { repository }
    }

    /// Lists the actor's tracks, newest first.
    pub async fn list_tracks(&self, actor: &UserIdentity) -> AppResult<Vec<Track>> {
        self.repository.list_tracks_for_owner(actor.subject()).await
    }

    /// Marks or unmarks one of the actor's tracks as a favorite.
    pub async fn set_favorite(
        &self,
        actor: &UserIdentity,
        track_id: TrackId,
        is_favorite: bool,
    ) -> AppResult<Track> {
        self.repository
            .set_favorite(actor.subject(), track_id, is_favorite)
            .await
    }

    /// Records one playback of the actor's track.
    pub async fn record_play(&self, actor: &UserIdentity, track_id: TrackId) -> AppResult<Track> {
        self.repository
            .increment_play_count(actor.subject(), track_id)
            .await
    }
}
