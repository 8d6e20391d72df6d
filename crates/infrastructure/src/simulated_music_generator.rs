//! Stand-in music generator that imitates a slow, occasionally failing
//! upstream engine.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use himig_application::{ComposedAudio, MusicGenerator};
use himig_core::{AppError, AppResult};
use himig_domain::{GenerationRequest, compose_track_title};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Simulated processing time per request.
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_secs(5);

/// Probability that a simulated generation fails.
pub const DEFAULT_FAILURE_PROBABILITY: f64 = 0.1;

/// Fixed pool of playable sample audio references.
pub const SAMPLE_AUDIO_URLS: [&str; 3] = [
    "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav",
    "https://file-examples.com/storage/fe68c1b7c1a9d6b/2017/11/file_example_MP3_700KB.mp3",
    "data:audio/wav;base64,UklGRnoGAABXQVZFZm10IBAAAAABAAEAQB8AAEAfAAABAAgAZGF0YQoGAACBhYqFbF1fdJivrJBhNjVgodDbq2EcBj+a2/LDciUFLIHO8tiJNwgZaLvt559NEAxQp+PwtmMcBjiR1/LMeSwFJHfH8N2QQAoUXrTp66hVFApGn+DyvmwhBSuBzvLZiTYIG2m98OScTgwOUarm7blmHgU7k9n1unEiBC13yO/eizEIHWq+8+OWT",
];

const GENERATION_FAILED_MESSAGE: &str = "Generation failed. Please try again.";

/// Music generator that sleeps, rolls for failure, then picks a sample clip.
#[derive(Debug)]
pub struct SimulatedMusicGenerator {
    delay: Duration,
    failure_probability: f64,
    rng: Mutex<StdRng>,
}

impl SimulatedMusicGenerator {
    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn new(delay: Duration, failure_probability: f64) -> Self {
        Self::with_rng(delay, failure_probability, StdRng::from_os_rng())
    }

    /// Creates a generator with a deterministic seed.
    #[must_use]
    pub fn with_seed(delay: Duration, failure_probability: f64, seed: u64) -> Self {
        Self::with_rng(delay, failure_probability, StdRng::seed_from_u64(seed))
    }

    fn with_rng(delay: Duration, failure_probability: f64, rng: StdRng) -> Self {
        let failure_probability = if failure_probability.is_finite() {
            failure_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            delay,
            failure_probability,
            rng: Mutex::new(rng),
        }
    }

    fn roll(&self, request: &GenerationRequest) -> AppResult<ComposedAudio> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| AppError::Internal("generator rng lock poisoned".to_owned()))?;

        if rng.random_bool(self.failure_probability) {
            return Err(AppError::GenerationFailed(
                GENERATION_FAILED_MESSAGE.to_owned(),
            ));
        }

        let title = compose_track_title(
            request.prompt(),
            request.genre(),
            request.mood(),
            &mut *rng,
        );
        let audio_url = SAMPLE_AUDIO_URLS
            .choose(&mut *rng)
            .copied()
            .unwrap_or(SAMPLE_AUDIO_URLS[0])
            .to_owned();

        Ok(ComposedAudio { title, audio_url })
    }
}

impl Default for SimulatedMusicGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_GENERATION_DELAY, DEFAULT_FAILURE_PROBABILITY)
    }
}

#[async_trait]
impl MusicGenerator for SimulatedMusicGenerator {
    async fn compose(&self, request: &GenerationRequest) -> AppResult<ComposedAudio> {
        debug!(delay_ms = self.delay.as_millis(), "simulating music generation");
        tokio::time::sleep(self.delay).await;

        // The rng guard is dropped inside `roll`, before any further await.
        self.roll(request)
    }
}
