//! Error types for the speech pipeline.

use murmur_core::error::MurmurError;

/// Errors from directive parsing, synthesis, and audio output.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// A value directive carried a payload that does not parse as a number.
    /// Aborts the current turn's synthesis; never falls back to a default.
    #[error("invalid value for [{key}]: '{value}'")]
    Directive { key: &'static str, value: String },
    /// The synthesis backend rejected or failed a request.
    #[error("synthesis backend error: {0}")]
    Backend(String),
    /// The synthesized audio could not be written.
    #[error("audio write error: {0}")]
    Sink(String),
    /// The written audio could not be played.
    #[error("playback error: {0}")]
    Playback(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        SpeechError::Backend(err.to_string())
    }
}

impl From<SpeechError> for MurmurError {
    fn from(err: SpeechError) -> Self {
        MurmurError::Speech(err.to_string())
    }
}
