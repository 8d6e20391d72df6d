//! Application services and ports.

#![forbid(unsafe_code)]

mod clock;
mod generation_service;
mod rate_limit_service;
mod track_ports;
mod track_service;

pub use clock::{Clock, SystemClock};
pub use generation_service::{ComposedAudio, GenerationService, MusicGenerator};
pub use rate_limit_service::{
    ANONYMOUS_KEY, ClientFingerprint, KeyStrategy, RateLimitPolicy, RateLimitService,
    RateLimitStore, RateLimitVerdict, WindowUsage,
};
pub use track_ports::TrackRepository;
pub use track_service::TrackLibraryService;
