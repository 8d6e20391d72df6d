//! Music generation orchestration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use himig_core::{AppResult, UserIdentity};
use himig_domain::{GenerationRequest, NewTrack, Track, TrackId};

use crate::{Clock, TrackRepository};

#[cfg(test)]
mod tests;

/// Port for the upstream music generation engine.
#[async_trait]
pub trait MusicGenerator: Send + Sync {
    /// Produces audio for a validated request.
    ///
    /// Failures are terminal for the request; callers do not retry.
    async fn compose(&self, request: &GenerationRequest) -> AppResult<ComposedAudio>;
}

/// Audio returned by a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedAudio {
    /// Display title for the track.
    pub title: String,
    /// Playable audio reference.
    pub audio_url: String,
}

/// Application service turning generation requests into stored tracks.
#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<dyn MusicGenerator>,
    track_repository: Arc<dyn TrackRepository>,
    clock: Arc<dyn Clock>,
}

impl GenerationService {
    /// Creates a new generation service.
    #[must_use]
    pub fn new(
        generator: Arc<dyn MusicGenerator>,
        track_repository: Arc<dyn TrackRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            generator,
            track_repository,
            clock,
        }
    }

    /// Generates one track for the actor and stores it in their library.
    pub async fn generate_track(
        &self,
        actor: &UserIdentity,
        request: GenerationRequest,
    ) -> AppResult<Track> {
        let audio = match self.generator.compose(&request).await {
            Ok(audio) => audio,
            Err(error) => {
                warn!(subject = %actor.subject(), error = %error, "music generation failed");
                return Err(error);
            }
        };

        let track = self
            .track_repository
            .save_track(NewTrack {
                id: TrackId::new(),
                owner_subject: actor.subject().to_owned(),
                title: audio.title,
                prompt: request.prompt().to_owned(),
                genre: request.genre().to_owned(),
                mood: request.mood().to_owned(),
                duration_seconds: request.duration_seconds(),
                audio_url: audio.audio_url,
                created_at: self.clock.now(),
            })
            .await?;

        info!(
            subject = %actor.subject(),
            track_id = %track.id,
            duration_seconds = track.duration_seconds,
            "track generated"
        );

        Ok(track)
    }
}
