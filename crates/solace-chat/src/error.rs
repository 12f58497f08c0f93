//! Error types for the conversation session.

use std::time::Duration;

use solace_core::error::SolaceError;

/// Errors surfaced to callers of the conversation session.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("a reply is already pending")]
    Busy,
    #[error("conversation session has ended")]
    SessionClosed,
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("voice error: {0}")]
    VoiceUnavailable(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<SolaceError> for ChatError {
    fn from(err: SolaceError) -> Self {
        ChatError::Config(err.to_string())
    }
}

/// Failures reported by a reply-generation service.
///
/// These never reach callers of the session; the store turns them into a
/// fallback assistant message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("reply timed out after {0:?}")]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(ChatError::Busy.to_string(), "a reply is already pending");
        assert_eq!(
            ChatError::SessionClosed.to_string(),
            "conversation session has ended"
        );
        assert_eq!(
            ChatError::Runtime("no reactor".to_string()).to_string(),
            "runtime error: no reactor"
        );
        assert_eq!(
            ChatError::VoiceUnavailable("no microphone".to_string()).to_string(),
            "voice error: no microphone"
        );
    }

    #[test]
    fn test_chat_error_from_solace_error() {
        let err: ChatError = SolaceError::UnknownTab("nowhere".to_string()).into();
        assert!(matches!(err, ChatError::Config(_)));
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn test_reply_error_display() {
        assert_eq!(
            ReplyError::Upstream("502 Bad Gateway".to_string()).to_string(),
            "upstream error: 502 Bad Gateway"
        );
        assert_eq!(
            ReplyError::Timeout(Duration::from_millis(1500)).to_string(),
            "reply timed out after 1.5s"
        );
    }
}
