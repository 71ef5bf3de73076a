//! Conversation session state.
//!
//! Tracks the opaque backend-issued identifiers that thread a multi-turn
//! dialogue. The state is owned exclusively by the turn orchestrator; every
//! method is a pure transition, and the backend side effects that accompany
//! them (reset, rollback) are issued separately by the owner.

use serde::Serialize;

/// Identifiers needed to continue, rewind, or redirect a dialogue.
///
/// `parent_id` is only meaningful together with `conversation_id`; both come
/// from the backend's prior responses and are threaded into the next request
/// unchanged unless the session is reset or redirected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    conversation_id: Option<String>,
    parent_id: Option<String>,
}

impl ConversationState {
    /// Fresh session with no continuation ids.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    /// Replace both ids with the backend's latest values.
    ///
    /// Called once per successful dialogue turn; this is how the session
    /// naturally progresses turn-to-turn.
    pub fn advance(&mut self, conversation_id: String, parent_id: String) {
        self.conversation_id = Some(conversation_id);
        self.parent_id = Some(parent_id);
    }

    /// Forget the current conversation entirely.
    pub fn reset(&mut self) {
        self.conversation_id = None;
        self.parent_id = None;
    }

    /// Redirect the session to an existing conversation.
    ///
    /// The parent id is cleared; the backend's next reply re-establishes it.
    pub fn set_conversation(&mut self, id: String) {
        self.conversation_id = Some(id);
        self.parent_id = None;
    }
}

// =============================================================================
// Tests
// =============================================================================
