//! Story Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryValidationError {
    #[error("Either character or theme must be provided")]
    MissingSubject,

    #[error("Character must be at least {min} characters long")]
    CharacterTooShort { min: usize },

    #[error("Theme must be at least {min} characters long")]
    ThemeTooShort { min: usize },

    #[error("Duration must be between {min} and {max} minutes")]
    DurationOutOfRange { min: i64, max: i64 },
}
