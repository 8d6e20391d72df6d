//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_rate_limit_store;
mod in_memory_track_repository;
mod postgres_track_repository;
mod redis_rate_limit_store;
mod simulated_music_generator;

pub use in_memory_rate_limit_store::InMemoryRateLimitStore;
pub use in_memory_track_repository::InMemoryTrackRepository;
pub use postgres_track_repository::{MIGRATOR, PostgresTrackRepository};
pub use redis_rate_limit_store::RedisRateLimitStore;
pub use simulated_music_generator::{
    DEFAULT_FAILURE_PROBABILITY, DEFAULT_GENERATION_DELAY, SAMPLE_AUDIO_URLS,
    SimulatedMusicGenerator,
};
