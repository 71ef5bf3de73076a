//! Error types for the chat backend boundary.

use murmur_core::error::MurmurError;

/// Errors from the conversational backend.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The backend rejected or failed a request. Conversation ids are never
    /// advanced when this is returned.
    #[error("chat backend error: {0}")]
    Backend(String),
    /// Credential renewal was rejected. Surfaced to the user, not retried.
    #[error("session refresh rejected: {0}")]
    Auth(String),
    /// The backend answered with a payload missing required fields.
    #[error("malformed backend reply: {0}")]
    Reply(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Backend(err.to_string())
    }
}

impl From<ChatError> for MurmurError {
    fn from(err: ChatError) -> Self {
        MurmurError::Chat(err.to_string())
    }
}
