use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use himig_core::{AppError, AppResult, UserIdentity};
use himig_domain::{GenerationRequest, NewTrack, Track, TrackId};

use crate::{ComposedAudio, MusicGenerator, SystemClock, TrackRepository};

use super::GenerationService;

struct FakeGenerator {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeGenerator {
    fn succeeding() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MusicGenerator for FakeGenerator {
    async fn compose(&self, request: &GenerationRequest) -> AppResult<ComposedAudio> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::GenerationFailed(
                "Generation failed. Please try again.".to_owned(),
            ));
        }

        Ok(ComposedAudio {
            title: format!("{} Vibes", request.genre()),
            audio_url: "https://cdn.example.com/sample.wav".to_owned(),
        })
    }
}

#[derive(Default)]
struct FakeTrackRepository {
    saved: Mutex<Vec<Track>>,
}

#[async_trait]
impl TrackRepository for FakeTrackRepository {
    async fn save_track(&self, track: NewTrack) -> AppResult<Track> {
        let track = Track::from(track);
        self.saved.lock().await.push(track.clone());
        Ok(track)
    }

    async fn list_tracks_for_owner(&self, owner_subject: &str) -> AppResult<Vec<Track>> {
        Ok(self
            .saved
            .lock()
            .await
            .iter()
            .filter(|track| track.owner_subject == owner_subject)
            .cloned()
            .collect())
    }

    async fn set_favorite(
        &self,
        _owner_subject: &str,
        track_id: TrackId,
        _is_favorite: bool,
    ) -> AppResult<Track> {
        Err(AppError::NotFound(format!("track '{track_id}' not found")))
    }

    async fn increment_play_count(
        &self,
        _owner_subject: &str,
        track_id: TrackId,
    ) -> AppResult<Track> {
        Err(AppError::NotFound(format!("track '{track_id}' not found")))
    }
}

fn valid_request() -> GenerationRequest {
    match GenerationRequest::new("warm summer evening", "Jazz", "Relaxed", 45) {
        Ok(request) => request,
        Err(error) => panic!("valid request rejected: {error}"),
    }
}

#[tokio::test]
async fn successful_generation_stores_fresh_track() {
    let generator = Arc::new(FakeGenerator::succeeding());
    let repository = Arc::new(FakeTrackRepository::default());
    let service = GenerationService::new(
        generator.clone(),
        repository.clone(),
        Arc::new(SystemClock),
    );
    let actor = UserIdentity::new("user_123");

    let result = service.generate_track(&actor, valid_request()).await;
    let Ok(track) = result else {
        panic!("generation should succeed");
    };

    assert_eq!(track.owner_subject, "user_123");
    assert_eq!(track.title, "Jazz Vibes");
    assert_eq!(track.prompt, "warm summer evening");
    assert_eq!(track.duration_seconds, 45);
    assert_eq!(track.play_count, 0);
    assert!(!track.is_favorite);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    let stored = repository.list_tracks_for_owner("user_123").await;
    assert!(matches!(stored, Ok(tracks) if tracks.len() == 1 && tracks[0].id == track.id));
}

#[tokio::test]
async fn each_generation_assigns_a_new_identifier() {
    let service = GenerationService::new(
        Arc::new(FakeGenerator::succeeding()),
        Arc::new(FakeTrackRepository::default()),
        Arc::new(SystemClock),
    );
    let actor = UserIdentity::new("user_123");

    let first = service.generate_track(&actor, valid_request()).await;
    let second = service.generate_track(&actor, valid_request()).await;

    match (first, second) {
        (Ok(first), Ok(second)) => assert_ne!(first.id, second.id),
        _ => panic!("both generations should succeed"),
    }
}

#[tokio::test]
async fn generator_failure_is_not_retried_and_nothing_is_stored() {
    let generator = Arc::new(FakeGenerator::failing());
    let repository = Arc::new(FakeTrackRepository::default());
    let service = GenerationService::new(
        generator.clone(),
        repository.clone(),
        Arc::new(SystemClock),
    );

    let result = service
        .generate_track(&UserIdentity::new("user_123"), valid_request())
        .await;

    assert!(matches!(result, Err(AppError::GenerationFailed(_))));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert!(repository.saved.lock().await.is_empty());
}
