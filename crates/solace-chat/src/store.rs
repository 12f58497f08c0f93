//! Conversation store: the ordered message timeline and the reply-pending flag.
//!
//! Every user message is appended synchronously with the next sequence index.
//! Replies are produced on a spawned task keyed by a [`ReplyToken`]; at most
//! one such task is in flight per session. A completion whose token is no
//! longer the in-flight token (already applied, superseded, or the session
//! was torn down) is dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;
use uuid::Uuid;

use solace_core::config::{ChatConfig, OverlapPolicy};
use solace_core::types::{Author, SequenceIndex};

use crate::error::{ChatError, ReplyError};
use crate::responder::ReplyService;
use crate::types::{ConversationEvent, Message, ReplyRequest, ReplyResponse, ReplyToken};

/// Capacity of the change-notification channel.
pub(crate) const EVENT_CAPACITY: usize = 64;

/// One conversation session.
///
/// Dropping the store tears the session down.
pub struct ConversationStore {
    shared: Arc<Shared>,
}

/// Read-only handle onto a conversation, for renderers and observers.
#[derive(Clone)]
pub struct ConversationView {
    shared: Arc<Shared>,
}

struct Shared {
    session_id: Uuid,
    config: ChatConfig,
    service: Arc<dyn ReplyService>,
    state: Mutex<ConversationState>,
    events: broadcast::Sender<ConversationEvent>,
    pending: watch::Sender<bool>,
}

struct ConversationState {
    messages: Vec<Message>,
    next_index: SequenceIndex,
    next_request_id: u64,
    in_flight: Option<InFlight>,
    /// User texts whose reply request waits behind the in-flight one.
    queued: VecDeque<String>,
    closed: bool,
}

struct InFlight {
    token: ReplyToken,
    abort: AbortHandle,
}

impl ConversationStore {
    /// Start a new session seeded with the configured assistant greeting.
    pub fn new(config: ChatConfig, service: Arc<dyn ReplyService>) -> Self {
        let session_id = Uuid::new_v4();
        let greeting = if config.greeting.trim().is_empty() {
            ChatConfig::default().greeting
        } else {
            config.greeting.trim().to_string()
        };

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (pending, _) = watch::channel(false);

        let seed = Message::new(SequenceIndex(0), Author::Assistant, greeting, false);
        let state = ConversationState {
            messages: vec![seed],
            next_index: SequenceIndex(1),
            next_request_id: 1,
            in_flight: None,
            queued: VecDeque::new(),
            closed: false,
        };

        tracing::info!(
            session_id = %session_id,
            backend = service.name(),
            "Conversation session started"
        );

        Self {
            shared: Arc::new(Shared {
                session_id,
                config,
                service,
                state: Mutex::new(state),
                events,
                pending,
            }),
        }
    }

    /// Append a user message and request a reply to it.
    ///
    /// Returns the message's sequence index. The reply arrives later as an
    /// assistant message; `pending_reply()` is true from this call until it
    /// does. While a reply is in flight the configured [`OverlapPolicy`]
    /// decides whether the submission queues or fails with [`ChatError::Busy`].
    pub fn append_user_message(&self, text: &str) -> Result<SequenceIndex, ChatError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let max = self.shared.config.max_message_length;
        if trimmed.chars().count() > max {
            return Err(ChatError::MessageTooLong(max));
        }

        let mut state = self.shared.lock()?;
        if state.closed {
            return Err(ChatError::SessionClosed);
        }

        let was_pending = state.in_flight.is_some();
        if was_pending {
            match self.shared.config.overlap_policy {
                OverlapPolicy::Reject => return Err(ChatError::Busy),
                OverlapPolicy::Queue => state.queued.push_back(trimmed.to_string()),
            }
        } else {
            // Dispatch before appending so a missing runtime leaves no trace.
            self.shared.dispatch(&mut state, trimmed.to_string())?;
        }

        let index = self
            .shared
            .push(&mut state, Author::User, trimmed.to_string(), false);
        self.shared.publish_pending(&state, was_pending);

        tracing::debug!(
            session_id = %self.shared.session_id,
            sequence_index = index.0,
            queued = state.queued.len(),
            "User message appended"
        );
        Ok(index)
    }

    /// Apply a reply-service outcome for `token`.
    ///
    /// Returns `false` (and changes nothing) unless `token` is the in-flight
    /// request of an open session, so each request completes at most once.
    pub fn on_reply_ready(
        &self,
        token: ReplyToken,
        outcome: Result<ReplyResponse, ReplyError>,
    ) -> bool {
        self.shared.complete(token, outcome)
    }

    /// Tear the session down.
    ///
    /// Aborts the in-flight reply, discards queued requests, and guarantees
    /// that no late completion mutates this or any other session.
    pub fn teardown(&self) {
        let mut state = match self.shared.lock() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Conversation teardown skipped");
                return;
            }
        };
        if state.closed {
            return;
        }
        state.closed = true;

        let was_pending = state.in_flight.is_some();
        if let Some(in_flight) = state.in_flight.take() {
            in_flight.abort.abort();
            tracing::debug!(
                session_id = %self.shared.session_id,
                request_id = in_flight.token.request_id,
                "Outstanding reply cancelled"
            );
        }
        let dropped = state.queued.len();
        state.queued.clear();

        self.shared.publish_pending(&state, was_pending);
        let _ = self.shared.events.send(ConversationEvent::Closed);

        tracing::info!(
            session_id = %self.shared.session_id,
            messages = state.messages.len(),
            dropped_requests = dropped,
            "Conversation session ended"
        );
    }

    /// Wait until no reply is pending.
    pub async fn wait_for_reply(&self) {
        self.view().wait_for_reply().await;
    }

    /// Read-only handle sharing this session's state.
    pub fn view(&self) -> ConversationView {
        ConversationView {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.shared.session_id
    }

    /// Full timeline in sequence-index order.
    pub fn messages(&self) -> Vec<Message> {
        self.shared.messages()
    }

    pub fn len(&self) -> usize {
        self.shared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_reply(&self) -> bool {
        self.shared.pending_reply()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().map(|s| s.closed).unwrap_or(true)
    }

    /// Token of the request currently in flight, if any.
    pub fn in_flight_token(&self) -> Option<ReplyToken> {
        self.shared
            .lock()
            .ok()
            .and_then(|s| s.in_flight.as_ref().map(|f| f.token))
    }

    /// Number of reply requests waiting behind the in-flight one.
    pub fn queued_len(&self) -> usize {
        self.shared.lock().map(|s| s.queued.len()).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.shared.events.subscribe()
    }
}

impl Drop for ConversationStore {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("session_id", &self.shared.session_id)
            .field("len", &self.len())
            .field("pending_reply", &self.pending_reply())
            .finish()
    }
}

impl ConversationView {
    pub fn session_id(&self) -> Uuid {
        self.shared.session_id
    }

    pub fn messages(&self) -> Vec<Message> {
        self.shared.messages()
    }

    /// Messages with an index greater than `after`.
    pub fn messages_after(&self, after: Option<SequenceIndex>) -> Vec<Message> {
        self.shared
            .lock()
            .map(|s| {
                s.messages
                    .iter()
                    .filter(|m| after.map_or(true, |a| m.index > a))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.shared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_reply(&self) -> bool {
        self.shared.pending_reply()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.shared.events.subscribe()
    }

    /// Wait until no reply is pending.
    pub async fn wait_for_reply(&self) {
        let mut rx = self.shared.pending.subscribe();
        // The sender lives in `shared`, which this view keeps alive.
        let _ = rx.wait_for(|pending| !*pending).await;
    }
}

impl Shared {
    fn lock(&self) -> Result<MutexGuard<'_, ConversationState>, ChatError> {
        self.state
            .lock()
            .map_err(|e| ChatError::Internal(format!("conversation lock poisoned: {}", e)))
    }

    fn messages(&self) -> Vec<Message> {
        self.lock().map(|s| s.messages.clone()).unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.lock().map(|s| s.messages.len()).unwrap_or(0)
    }

    fn pending_reply(&self) -> bool {
        self.lock().map(|s| s.in_flight.is_some()).unwrap_or(false)
    }

    fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.config.reply_timeout_ms)
    }

    fn push(
        &self,
        state: &mut ConversationState,
        author: Author,
        text: String,
        fallback: bool,
    ) -> SequenceIndex {
        let index = state.next_index;
        state.next_index = index.next();
        state
            .messages
            .push(Message::new(index, author, text, fallback));
        let _ = self.events.send(ConversationEvent::MessageAppended {
            index,
            len: state.messages.len(),
        });
        index
    }

    fn publish_pending(&self, state: &ConversationState, was_pending: bool) {
        let pending = state.in_flight.is_some();
        if pending != was_pending {
            self.pending.send_replace(pending);
            let _ = self.events.send(ConversationEvent::PendingChanged {
                pending,
                len: state.messages.len(),
            });
        }
    }

    /// Spawn the reply task for `user_text` and record it as in flight.
    fn dispatch(
        self: &Arc<Self>,
        state: &mut ConversationState,
        user_text: String,
    ) -> Result<(), ChatError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ChatError::Runtime(e.to_string()))?;

        let token = ReplyToken {
            session_id: self.session_id,
            request_id: state.next_request_id,
        };
        let timeout = self.reply_timeout();
        let shared = Arc::clone(self);

        let handle = runtime.spawn(async move {
            let request = ReplyRequest { user_text };
            let outcome =
                match tokio::time::timeout(timeout, shared.service.generate_reply(&request)).await
                {
                    Ok(result) => result,
                    Err(_) => Err(ReplyError::Timeout(timeout)),
                };
            shared.complete(token, outcome);
        });

        state.next_request_id += 1;
        state.in_flight = Some(InFlight {
            token,
            abort: handle.abort_handle(),
        });

        tracing::debug!(
            session_id = %self.session_id,
            request_id = token.request_id,
            timeout_ms = timeout.as_millis() as u64,
            "Reply requested"
        );
        Ok(())
    }

    fn complete(
        self: &Arc<Self>,
        token: ReplyToken,
        outcome: Result<ReplyResponse, ReplyError>,
    ) -> bool {
        let mut state = match self.lock() {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(error = %e, "Reply dropped");
                return false;
            }
        };

        let current = state.in_flight.as_ref().map(|f| f.token);
        if state.closed || current != Some(token) {
            tracing::warn!(
                session_id = %self.session_id,
                stale_session = %token.session_id,
                request_id = token.request_id,
                closed = state.closed,
                "Dropping stale reply"
            );
            return false;
        }
        // A completion applied from outside the task must not leave the
        // service call running.
        if let Some(in_flight) = state.in_flight.take() {
            in_flight.abort.abort();
        }

        let (text, fallback) = match outcome {
            Ok(reply) if !reply.reply_text.trim().is_empty() => {
                (reply.reply_text.trim().to_string(), false)
            }
            Ok(_) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    request_id = token.request_id,
                    "Reply service returned empty text"
                );
                (self.config.fallback_text.clone(), true)
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    request_id = token.request_id,
                    error = %e,
                    "Reply failed, appending fallback"
                );
                (self.config.fallback_text.clone(), true)
            }
        };
        let index = self.push(&mut state, Author::Assistant, text, fallback);
        tracing::debug!(
            session_id = %self.session_id,
            request_id = token.request_id,
            sequence_index = index.0,
            fallback,
            "Reply appended"
        );

        while state.in_flight.is_none() {
            let Some(next) = state.queued.pop_front() else {
                break;
            };
            if let Err(e) = self.dispatch(&mut state, next) {
                tracing::warn!(error = %e, "Queued reply could not be dispatched");
                self.push(
                    &mut state,
                    Author::Assistant,
                    self.config.fallback_text.clone(),
                    true,
                );
            }
        }

        self.publish_pending(&state, true);
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
