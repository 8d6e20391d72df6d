use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use himig_application::TrackRepository;
use himig_core::{AppError, AppResult};
use himig_domain::{NewTrack, Track, TrackId};
use tokio::sync::RwLock;

/// In-memory track repository used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryTrackRepository {
    tracks: RwLock<HashMap<TrackId, Track>>,
}

impl InMemoryTrackRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn update_owned<F>(
        &self,
        owner_subject: &str,
        track_id: TrackId,
        update: F,
    ) -> AppResult<Track>
    where
        F: FnOnce(&mut Track) + Send,
    {
        let mut tracks = self.tracks.write().await;
        let track = tracks
            .get_mut(&track_id)
            .filter(|track| track.owner_subject == owner_subject)
            .ok_or_else(|| AppError::NotFound(format!("track '{track_id}' not found")))?;

        update(track);
        track.updated_at = Utc::now();
        Ok(track.clone())
    }
}

#[async_trait]
impl TrackRepository for InMemoryTrackRepository {
    async fn save_track(&self, track: NewTrack) -> AppResult<Track> {
        let track = Track::from(track);
        let mut tracks = self.tracks.write().await;

        if tracks.contains_key(&track.id) {
            return Err(AppError::Internal(format!(
                "track '{}' already exists",
                track.id
            )));
        }

        tracks.insert(track.id, track.clone());
        Ok(track)
    }

    async fn list_tracks_for_owner(&self, owner_subject: &str) -> AppResult<Vec<Track>> {
        let tracks = self.tracks.read().await;

        let mut values: Vec<Track> = tracks
            .values()
            .filter(|track| track.owner_subject == owner_subject)
            .cloned()
            .collect();
        values.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        Ok(values)
    }

    async fn set_favorite(
        &self,
        owner_subject: &str,
        track_id: TrackId,
        is_favorite: bool,
    ) -> AppResult<Track> {
        self.update_owned(owner_subject, track_id, |track| {
            track.is_favorite = is_favorite;
        })
        .await
    }

    async fn increment_play_count(
        &self,
        owner_subject: &str,
        track_id: TrackId,
    ) -> AppResult<Track> {
        self.update_owned(owner_subject, track_id, |track| {
            track.play_count = track.play_count.saturating_add(1);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use himig_application::{TrackLibraryService, TrackRepository};
    use himig_core::{AppError, UserIdentity};
    use himig_domain::{NewTrack, TrackId};

    use super::InMemoryTrackRepository;

    fn new_track(owner: &str, title: &str, age_minutes: i64) -> NewTrack {
        NewTrack {
            id: TrackId::new(),
            owner_subject: owner.to_owned(),
            title: title.to_owned(),
            prompt: "misty mountain morning".to_owned(),
            genre: "Folk".to_owned(),
            mood: "Calm".to_owned(),
            duration_seconds: 60,
            audio_url: "https://cdn.example.com/a.wav".to_owned(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn library_lists_only_owner_tracks_newest_first() {
        let repository = Arc::new(InMemoryTrackRepository::new());
        for track in [
            new_track("alice", "Old", 30),
            new_track("alice", "New", 1),
            new_track("bob", "Other", 5),
        ] {
            assert!(repository.save_track(track).await.is_ok());
        }

        let service = TrackLibraryService::new(repository);
        let tracks = service.list_tracks(&UserIdentity::new("alice")).await;
        let Ok(tracks) = tracks else {
            panic!("listing should succeed");
        };

        let titles: Vec<&str> = tracks.iter().map(|track| track.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[tokio::test]
    async fn favorite_and_play_count_updates_are_persisted() {
        let repository = Arc::new(InMemoryTrackRepository::new());
        let track = new_track("alice", "Loop", 0);
        let track_id = track.id;
        assert!(repository.save_track(track).await.is_ok());

        let service = TrackLibraryService::new(repository.clone());
        let actor = UserIdentity::new("alice");

        let favorite = service.set_favorite(&actor, track_id, true).await;
        assert!(matches!(favorite, Ok(track) if track.is_favorite));

        assert!(service.record_play(&actor, track_id).await.is_ok());
        let played = service.record_play(&actor, track_id).await;
        assert!(matches!(played, Ok(track) if track.play_count == 2 && track.is_favorite));
    }

    #[tokio::test]
    async fn foreign_tracks_are_not_found() {
        let repository = Arc::new(InMemoryTrackRepository::new());
        let track = new_track("alice", "Private", 0);
        let track_id = track.id;
        assert!(repository.save_track(track).await.is_ok());

        let service = TrackLibraryService::new(repository);
        let mallory = UserIdentity::new("mallory");

        assert!(matches!(
            service.set_favorite(&mallory, track_id, true).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.record_play(&mallory, TrackId::new()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
