use std::str::FromStr;

use chrono::{DateTime, Utc};
use himig_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a generated track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(Uuid);

impl TrackId {
    /// Creates a new random track identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a track identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for TrackId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid track id '{value}': {error}")))
    }
}

/// Track data produced by a successful generation, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrack {
    /// Identifier assigned at generation time.
    pub id: TrackId,
    /// Subject of the user who requested the track.
    pub owner_subject: String,
    /// Synthesized display title.
    pub title: String,
    /// Prompt as submitted.
    pub prompt: String,
    /// Requested genre.
    pub genre: String,
    /// Requested mood.
    pub mood: String,
    /// Track length in seconds.
    pub duration_seconds: u32,
    /// Playable audio reference.
    pub audio_url: String,
    /// Generation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A stored track in a user's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier.
    pub id: TrackId,
    /// Subject of the owning user.
    pub owner_subject: String,
    /// Display title.
    pub title: String,
    /// Prompt as submitted.
    pub prompt: String,
    /// Requested genre.
    pub genre: String,
    /// Requested mood.
    pub mood: String,
    /// Track length in seconds.
    pub duration_seconds: u32,
    /// Playable audio reference.
    pub audio_url: String,
    /// Whether the owner marked the track as a favorite.
    pub is_favorite: bool,
    /// Number of recorded plays.
    pub play_count: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<NewTrack> for Track {
    fn from(value: NewTrack) -> Self {
        Self {
            id: value.id,
            owner_subject: value.owner_subject,
            title: value.title,
            prompt: value.prompt,
            genre: value.genre,
            mood: value.mood,
            duration_seconds: value.duration_seconds,
            audio_url: value.audio_url,
            is_favorite: false,
            play_count: 0,
            created_at: value.created_at,
            updated_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{NewTrack, Track, TrackId};

    #[test]
    fn track_id_parses_its_display_form() {
        let id = TrackId::new();
        let parsed = id.to_string().parse::<TrackId>();
        assert!(matches!(parsed, Ok(value) if value == id));
    }

    #[test]
    fn track_id_rejects_garbage() {
        assert!("not-a-track".parse::<TrackId>().is_err());
    }

    #[test]
    fn new_track_starts_unplayed_and_not_favorite() {
        let now = Utc::now();
        let track = Track::from(NewTrack {
            id: TrackId::new(),
            owner_subject: "user_1".to_owned(),
            title: "Ocean Vibes".to_owned(),
            prompt: "calm ocean".to_owned(),
            genre: "Ambient".to_owned(),
            mood: "Peaceful".to_owned(),
            duration_seconds: 30,
            audio_url: "https://example.com/a.wav".to_owned(),
            created_at: now,
        });

        assert!(!track.is_favorite);
        assert_eq!(track.play_count, 0);
        assert_eq!(track.updated_at, now);
    }
}
