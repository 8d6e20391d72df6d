//! Validated music generation requests.

use himig_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Shortest track length accepted, in seconds.
pub const MIN_DURATION_SECONDS: i64 = 15;

/// Longest track length accepted, in seconds.
pub const MAX_DURATION_SECONDS: i64 = 120;

/// A music generation request that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    prompt: NonEmptyString,
    genre: NonEmptyString,
    mood: NonEmptyString,
    duration_seconds: u32,
}

impl GenerationRequest {
    /// Validates raw generation input.
    ///
    /// Checks run in a fixed order (prompt, then genre and mood, then
    /// duration) and only the first violation is reported.
    pub fn new(
        prompt: impl Into<String>,
        genre: impl Into<String>,
        mood: impl Into<String>,
        duration_seconds: i64,
    ) -> AppResult<Self> {
        let prompt = NonEmptyString::new(prompt)
            .map_err(|_| AppError::Validation("Prompt is required".to_owned()))?;

        let (genre, mood) = match (NonEmptyString::new(genre), NonEmptyString::new(mood)) {
            (Ok(genre), Ok(mood)) => (genre, mood),
            _ => {
                return Err(AppError::Validation(
                    "Genre and mood are required".to_owned(),
                ));
            }
        };

        let duration_seconds = u32::try_from(duration_seconds)
            .ok()
            .filter(|_| {
                (MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&duration_seconds)
            })
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Duration must be between {MIN_DURATION_SECONDS} and {MAX_DURATION_SECONDS} seconds"
                ))
            })?;

        Ok(Self {
            prompt,
            genre,
            mood,
            duration_seconds,
        })
    }

    /// Returns the prompt exactly as submitted.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.prompt.as_str()
    }

    /// Returns the requested genre.
    #[must_use]
    pub fn genre(&self) -> &str {
        self.genre.as_str()
    }

    /// Returns the requested mood.
    #[must_use]
    pub fn mood(&self) -> &str {
        self.mood.as_str()
    }

    /// Returns the requested track length in seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }
}

#[cfg(test)]
mod tests {
    use himig_core::AppError;
    use proptest::prelude::*;

    use super::{GenerationRequest, MAX_DURATION_SECONDS, MIN_DURATION_SECONDS};

    fn validation_message(result: Result<GenerationRequest, AppError>) -> String {
        match result {
            Err(AppError::Validation(message)) => message,
            Err(other) => panic!("expected validation error, got {other}"),
            Ok(request) => panic!("expected validation error, got {request:?}"),
        }
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        assert!(GenerationRequest::new("city lights", "Jazz", "Calm", 15).is_ok());
        assert!(GenerationRequest::new("city lights", "Jazz", "Calm", 120).is_ok());

        assert_eq!(
            validation_message(GenerationRequest::new("city lights", "Jazz", "Calm", 14)),
            "Duration must be between 15 and 120 seconds"
        );
        assert_eq!(
            validation_message(GenerationRequest::new("city lights", "Jazz", "Calm", 121)),
            "Duration must be between 15 and 120 seconds"
        );
    }

    #[test]
    fn whitespace_prompt_is_rejected() {
        assert_eq!(
            validation_message(GenerationRequest::new("   ", "Jazz", "Calm", 30)),
            "Prompt is required"
        );
    }

    #[test]
    fn missing_genre_reports_genre_and_mood() {
        assert_eq!(
            validation_message(GenerationRequest::new("ok", "", "Happy", 30)),
            "Genre and mood are required"
        );
        assert_eq!(
            validation_message(GenerationRequest::new("ok", "Rock", " ", 30)),
            "Genre and mood are required"
        );
    }

    #[test]
    fn only_first_violation_is_reported() {
        assert_eq!(
            validation_message(GenerationRequest::new("", "", "", 0)),
            "Prompt is required"
        );
        assert_eq!(
            validation_message(GenerationRequest::new("ok", "", "", 0)),
            "Genre and mood are required"
        );
    }

    #[test]
    fn prompt_is_kept_untrimmed() {
        let request = GenerationRequest::new("  rainy night  ", "Lo-fi", "Calm", 45);
        assert!(request.is_ok());
        if let Ok(request) = request {
            assert_eq!(request.prompt(), "  rainy night  ");
            assert_eq!(request.duration_seconds(), 45);
        }
    }

    proptest! {
        #[test]
        fn durations_inside_range_are_accepted(duration in MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS) {
            let request = GenerationRequest::new("ocean waves", "Ambient", "Peaceful", duration);
            prop_assert!(request.is_ok());
        }

        #[test]
        fn durations_outside_range_are_rejected(
            duration in prop_oneof![i64::MIN..MIN_DURATION_SECONDS, (MAX_DURATION_SECONDS + 1)..i64::MAX]
        ) {
            let request = GenerationRequest::new("ocean waves", "Ambient", "Peaceful", duration);
            prop_assert!(request.is_err());
        }
    }
}
