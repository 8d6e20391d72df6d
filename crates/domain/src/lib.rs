//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod generation;
mod title;
mod track;

pub use generation::{GenerationRequest, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS};
pub use title::{UNTITLED_KEYWORD, compose_track_title};
pub use track::{NewTrack, Track, TrackId};
