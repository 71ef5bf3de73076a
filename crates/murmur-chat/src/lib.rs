//! Conversational backend client for murmur.
//!
//! Provides the session-state machine that threads continuation ids across
//! turns and the narrow [`ChatBackend`] capability interface with its
//! blocking HTTP implementation.

pub mod client;
pub mod error;
pub mod session;

pub use client::{ChatBackend, ChatReply, HttpChatClient};
pub use error::ChatError;
pub use session::ConversationState;
