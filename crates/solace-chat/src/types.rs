//! Data types for the conversation session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solace_core::types::{Author, SequenceIndex};

/// One entry in the conversation timeline. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub index: SequenceIndex,
    pub author: Author,
    /// Non-empty after trimming.
    pub text: String,
    /// Set on the assistant message that stands in for a failed reply.
    pub fallback: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(index: SequenceIndex, author: Author, text: String, fallback: bool) -> Self {
        Self {
            index,
            author,
            text,
            fallback,
            created_at: Utc::now(),
        }
    }
}

/// Change notification published by the conversation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEvent {
    /// A message was appended; `len` is the new timeline length.
    MessageAppended { index: SequenceIndex, len: usize },
    /// The reply-pending flag flipped.
    PendingChanged { pending: bool, len: usize },
    /// The session was torn down; no further events follow.
    Closed,
}

/// Identifies one dispatched reply request within one session.
///
/// A completion is applied only while its token is the session's in-flight
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyToken {
    pub session_id: Uuid,
    pub request_id: u64,
}

/// Request sent to the reply-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub user_text: String,
}

/// Successful response from the reply-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub reply_text: String,
}
