//! Reply generation.
//!
//! `ReplyService` is the seam between the conversation store and whatever
//! produces assistant replies. `SimulatedReplyService` answers locally after
//! a fixed latency with a reflection of the user's words; `HttpReplyService`
//! (see [`crate::http`]) forwards the request to a remote backend.

use std::time::Duration;

use async_trait::async_trait;

use solace_core::config::{InjectedFailure, ReplyBackendConfig};

use crate::error::ReplyError;
use crate::types::{ReplyRequest, ReplyResponse};

/// Produces one assistant reply per request.
///
/// Implementations may take arbitrarily long; the store bounds every call
/// with its own timeout and can abandon a call at any await point.
#[async_trait]
pub trait ReplyService: Send + Sync {
    async fn generate_reply(&self, request: &ReplyRequest) -> Result<ReplyResponse, ReplyError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Local stand-in for a reply backend: waits `latency`, then reflects the
/// user's text back.
#[derive(Debug, Clone)]
pub struct SimulatedReplyService {
    latency: Duration,
    failure: InjectedFailure,
}

impl Default for SimulatedReplyService {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl SimulatedReplyService {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failure: InjectedFailure::None,
        }
    }

    pub fn from_config(config: &ReplyBackendConfig) -> Self {
        Self::new(Duration::from_millis(config.latency_ms)).with_failure(config.inject_failure)
    }

    /// Report `failure` after the latency instead of replying.
    pub fn with_failure(mut self, failure: InjectedFailure) -> Self {
        self.failure = failure;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl ReplyService for SimulatedReplyService {
    async fn generate_reply(&self, request: &ReplyRequest) -> Result<ReplyResponse, ReplyError> {
        tokio::time::sleep(self.latency).await;
        match self.failure {
            InjectedFailure::None => Ok(ReplyResponse {
                reply_text: compose_reply(&request.user_text),
            }),
            InjectedFailure::Upstream => Err(ReplyError::Upstream(
                "simulated upstream failure".to_string(),
            )),
            InjectedFailure::Timeout => Err(ReplyError::Timeout(self.latency)),
        }
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// Reflective reply for `user_text`.
///
/// Deterministic: the same input always yields the same reply, and the
/// reply always quotes the lowercased input without trailing punctuation.
pub fn compose_reply(user_text: &str) -> String {
    let lowered = user_text.trim().to_lowercase();
    let reflected =
        lowered.trim_end_matches(|c: char| matches!(c, '.' | '!' | '?') || c.is_whitespace());
    let reflected = if reflected.is_empty() {
        lowered.as_str()
    } else {
        reflected
    };

    let pick = lowered
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
        % 3;

    match pick {
        0 => format!(
            "I hear you saying \"{}\". Can you tell me more about how that feels?",
            reflected
        ),
        1 => format!(
            "Thank you for sharing that. When you say \"{}\", what do you notice most?",
            reflected
        ),
        _ => format!(
            "It sounds like \"{}\" is on your mind. What would help right now?",
            reflected
        ),
    }
}
