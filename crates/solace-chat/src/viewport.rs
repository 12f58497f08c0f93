//! Keeps the newest conversation content in view.
//!
//! `ViewportSync` watches the store's change notifications and asks the
//! host to scroll whenever the timeline grows or the typing indicator
//! appears or disappears.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::store::ConversationView;
use crate::types::ConversationEvent;

/// The presentation surface that can follow the newest message.
pub trait ScrollHost: Send + Sync {
    /// Fire-and-forget request to show the latest content.
    fn scroll_to_latest(&self);
}

impl<F> ScrollHost for F
where
    F: Fn() + Send + Sync,
{
    fn scroll_to_latest(&self) {
        self()
    }
}

/// Observer translating conversation changes into scroll requests.
pub struct ViewportSync<H: ScrollHost> {
    host: H,
    last_len: usize,
    last_pending: bool,
    requests: u64,
}

impl<H: ScrollHost> ViewportSync<H> {
    /// Start observing from the view's current state; nothing scrolls until
    /// that state changes.
    pub fn new(host: H, view: &ConversationView) -> Self {
        Self {
            host,
            last_len: view.len(),
            last_pending: view.pending_reply(),
            requests: 0,
        }
    }

    /// Record an observation and scroll if it differs from the last one.
    ///
    /// Returns whether a scroll was requested.
    pub fn observe(&mut self, len: usize, pending: bool) -> bool {
        let grew = len > self.last_len;
        let flipped = pending != self.last_pending;
        self.last_len = len;
        self.last_pending = pending;

        if grew || flipped {
            self.requests += 1;
            self.host.scroll_to_latest();
            true
        } else {
            false
        }
    }

    /// Apply one store notification. Returns `false` once the session closed.
    pub fn handle_event(&mut self, event: ConversationEvent) -> bool {
        match event {
            ConversationEvent::MessageAppended { len, .. } => {
                let pending = self.last_pending;
                self.observe(len, pending);
                true
            }
            ConversationEvent::PendingChanged { pending, len } => {
                self.observe(len, pending);
                true
            }
            ConversationEvent::Closed => false,
        }
    }

    /// Follow `events` until the session closes. Returns the number of
    /// scroll requests issued.
    pub async fn run(
        mut self,
        mut events: broadcast::Receiver<ConversationEvent>,
        view: ConversationView,
    ) -> u64 {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if !self.handle_event(event) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Viewport lagged, resyncing");
                    self.observe(view.len(), view.pending_reply());
                }
                Err(RecvError::Closed) => break,
            }
        }
        self.requests
    }

    /// Scroll requests issued so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use solace_core::config::ChatConfig;

    use crate::responder::SimulatedReplyService;
    use crate::store::{ConversationStore, EVENT_CAPACITY};

    fn counting_host() -> (Arc<AtomicUsize>, impl ScrollHost) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn store() -> ConversationStore {
        ConversationStore::new(
            ChatConfig::default(),
            Arc::new(SimulatedReplyService::new(Duration::from_millis(1000))),
        )
    }

    #[tokio::test]
    async fn test_no_scroll_without_change() {
        let store = store();
        let (count, host) = counting_host();
        let mut sync = ViewportSync::new(host, &store.view());
        assert!(!sync.observe(1, false));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_scroll_on_growth_and_pending_flips() {
        let store = store();
        let (count, host) = counting_host();
        let mut sync = ViewportSync::new(host, &store.view());

        assert!(sync.observe(2, false));
        assert!(sync.observe(2, true));
        assert!(!sync.observe(2, true));
        assert!(sync.observe(2, false));
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(sync.requests(), 3);
    }

    #[tokio::test]
    async fn test_shrinking_length_does_not_scroll() {
        let store = store();
        let (_count, host) = counting_host();
        let mut sync = ViewportSync::new(host, &store.view());
        assert!(sync.observe(5, false));
        assert!(!sync.observe(1, false));
    }

    #[tokio::test]
    async fn test_closed_event_stops() {
        let store = store();
        let (_count, host) = counting_host();
        let mut sync = ViewportSync::new(host, &store.view());
        assert!(!sync.handle_event(ConversationEvent::Closed));
    }

    #[tokio::test]
    async fn test_lagged_receiver_scrolls_once_to_catch_up() {
        let store = store();
        let view = store.view();
        let (count, host) = counting_host();
        let events = view.subscribe();
        let sync = ViewportSync::new(host, &view);

        // One dispatch plus queued appends overflow the channel before the
        // observer reads anything.
        for i in 0..EVENT_CAPACITY + 6 {
            store.append_user_message(&format!("message {}", i)).unwrap();
        }
        store.teardown();

        let requests = sync.run(events, view.clone()).await;
        assert_eq!(requests, 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(view.len(), EVENT_CAPACITY + 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_follows_a_full_exchange() {
        let store = store();
        let view = store.view();
        let (count, host) = counting_host();
        let sync = ViewportSync::new(host, &view);
        let task = tokio::spawn(sync.run(view.subscribe(), view.clone()));

        store.append_user_message("I am anxious.").unwrap();
        store.wait_for_reply().await;
        store.teardown();

        let requests = task.await.unwrap();
        // user append, typing on, reply append, typing off
        assert_eq!(requests, 4);
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }
}
