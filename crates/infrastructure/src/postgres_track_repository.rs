//! PostgreSQL-backed track repository using the `generated_tracks` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use himig_application::TrackRepository;
use himig_core::{AppError, AppResult};
use himig_domain::{NewTrack, Track, TrackId};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use uuid::Uuid;


/// Embedded schema migrations for the track store.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const TRACK_COLUMNS: &str = "id, owner_subject, title, prompt, genre, mood, duration, audio_url, \
     is_favorite, play_count, created_at, updated_at";

/// PostgreSQL implementation of the track repository port.
#[derive(Clone)]
pub struct PostgresTrackRepository {
    pool: PgPool,
}

impl PostgresTrackRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackRepository for PostgresTrackRepository {
    async fn save_track(&self, track: NewTrack) -> AppResult<Track> {
        let duration = i32::try_from(track.duration_seconds)
            .map_err(|error| AppError::Validation(format!("invalid track duration: {error}")))?;

        let row = sqlx::query_as::<_, TrackRow>(&format!(
            r#"
            INSERT INTO generated_tracks (
                id, owner_subject, title, prompt, genre, mood, duration, audio_url,
                is_favorite, play_count, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, 0, $9, $9)
            RETURNING {TRACK_COLUMNS}
            "#
        ))
        .bind(track.id.as_uuid())
        .bind(track.owner_subject)
        .bind(track.title)
        .bind(track.prompt)
        .bind(track.genre)
        .bind(track.mood)
        .bind(duration)
        .bind(track.audio_url)
        .bind(track.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save track: {error}")))?;

        row.try_into()
    }

    async fn list_tracks_for_owner(&self, owner_subject: &str) -> AppResult<Vec<Track>> {
        let rows = sqlx::query_as::<_, TrackRow>(&format!(
            r#"
            SELECT {TRACK_COLUMNS}
            FROM generated_tracks
            WHERE owner_subject = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(owner_subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list tracks: {error}")))?;

        rows.into_iter().map(Track::try_from).collect()
    }

    async fn set_favorite(
        &self,
        owner_subject: &str,
        track_id: TrackId,
        is_favorite: bool,
    ) -> AppResult<Track> {
        let row = sqlx::query_as::<_, TrackRow>(&format!(
            r#"
            UPDATE generated_tracks
            SET is_favorite = $3, updated_at = now()
            WHERE id = $1 AND owner_subject = $2
            RETURNING {TRACK_COLUMNS}
            "#
        ))
        .bind(track_id.as_uuid())
        .bind(owner_subject)
        .bind(is_favorite)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update favorite: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("track '{track_id}' not found")))?;

        row.try_into()
    }

    async fn increment_play_count(
        &self,
        owner_subject: &str,
        track_id: TrackId,
    ) -> AppResult<Track> {
        let row = sqlx::query_as::<_, TrackRow>(&format!(
            r#"
            UPDATE generated_tracks
            SET play_count = play_count + 1, updated_at = now()
            WHERE id = $1 AND owner_subject = $2
            RETURNING {TRACK_COLUMNS}
            "#
        ))
        .bind(track_id.as_uuid())
        .bind(owner_subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to increment play count: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("track '{track_id}' not found")))?;

        row.try_into()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TrackRow {
    id: Uuid,
    owner_subject: String,
    title: String,
    prompt: String,
    genre: String,
    mood: String,
    duration: i32,
    audio_url: String,
    is_favorite: bool,
    play_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TrackRow> for Track {
    type Error = AppError;

    fn try_from(row: TrackRow) -> Result<Self, Self::Error> {
        let duration_seconds = u32::try_from(row.duration)
            .map_err(|error| AppError::Internal(format!("invalid stored duration: {error}")))?;
        let play_count = u32::try_from(row.play_count)
            .map_err(|error| AppError::Internal(format!("invalid stored play count: {error}")))?;

        Ok(Self {
            id: TrackId::from_uuid(row.id),
            owner_subject: row.owner_subject,
            title: row.title,
            prompt: row.prompt,
            genre: row.genre,
            mood: row.mood,
            duration_seconds,
            audio_url: row.audio_url,
            is_favorite: row.is_favorite,
            play_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
