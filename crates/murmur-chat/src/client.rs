//! Chat backend capability interface and its HTTP implementation.
//!
//! The orchestrator only ever sees [`ChatBackend`]; tests substitute a fake.
//! The HTTP client keeps the transport thin: JSON in, JSON out, bearer auth,
//! and an error per failed request. It never retries — a failed turn is
//! reported and the loop carries on with unchanged session state.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChatError;

/// One reply from the conversational backend. Both ids are required; the
/// caller threads them into the next request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub conversation_id: String,
    pub parent_id: String,
}

/// Narrow capability interface over the conversational backend.
pub trait ChatBackend {
    /// Send dialogue text along with the current continuation ids.
    fn ask(
        &self,
        text: &str,
        conversation_id: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<ChatReply, ChatError>;

    /// Drop all server-side continuation state.
    fn reset_chat(&self) -> Result<(), ChatError>;

    /// Re-validate or renew credentials. Continuation ids are unaffected.
    fn refresh_session(&self) -> Result<(), ChatError>;

    /// Discard the last `n` exchanges of the current conversation.
    fn rollback(&self, n: usize) -> Result<(), ChatError>;
}

#[derive(Serialize)]
struct AskRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a str>,
}

#[derive(Serialize)]
struct RollbackRequest {
    count: usize,
}

/// Blocking HTTP client for the conversational backend.
pub struct HttpChatClient {
    http: reqwest::blocking::Client,
    base_url: String,
    access_token: String,
}

impl HttpChatClient {
    pub fn new(
        base_url: &str,
        access_token: &str,
        timeout_secs: u64,
    ) -> Result<Self, ChatError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::blocking::Response, ChatError> {
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()?;
        Ok(resp)
    }
}

impl ChatBackend for HttpChatClient {
    fn ask(
        &self,
        text: &str,
        conversation_id: Option<&str>,
        parent_id: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        debug!(chars = text.len(), continuing = conversation_id.is_some(), "sending prompt");
        let body = AskRequest {
            prompt: text,
            conversation_id,
            parent_id,
        };
        let resp = check_status(self.post("conversation", &body)?)?;
        resp.json::<ChatReply>()
            .map_err(|e| ChatError::Reply(e.to_string()))
    }

    fn reset_chat(&self) -> Result<(), ChatError> {
        check_status(self.post("conversation/reset", &serde_json::json!({}))?)?;
        Ok(())
    }

    fn refresh_session(&self) -> Result<(), ChatError> {
        let resp = self.post("session/refresh", &serde_json::json!({}))?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            let body = resp.text().unwrap_or_default();
            return Err(ChatError::Auth(format!("{status}: {}", excerpt(&body))));
        }
        check_status(resp)?;
        Ok(())
    }

    fn rollback(&self, n: usize) -> Result<(), ChatError> {
        check_status(self.post("conversation/rollback", &RollbackRequest { count: n })?)?;
        Ok(())
    }
}

/// Turn a non-success response into a backend error carrying the status and
/// a short excerpt of the body.
fn check_status(
    resp: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ChatError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    Err(ChatError::Backend(format!("{status}: {}", excerpt(&body))))
}

/// First 200 chars of a body, on a char boundary.
fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

// =============================================================================
// Tests
// =============================================================================
