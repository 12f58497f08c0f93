//! Application session: one user's navigation state plus, while the Chat
//! panel is in use, the live conversation.
//!
//! The conversation is created lazily when Chat is entered. Leaving Chat
//! ends it when `chat.end_session_on_leave` is set, so a later visit starts
//! from a freshly seeded conversation.

use std::sync::Arc;
use std::time::Duration;

use solace_chat::{
    ChatError, ConversationStore, ConversationView, HttpReplyService, ReplyService,
    SimulatedReplyService, VoiceControl,
};
use solace_core::config::{ChatConfig, ReplyBackendKind, SolaceConfig};
use solace_core::types::{SequenceIndex, Tab, ViewportMode};
use solace_ui::emergency::contacts_from_config;
use solace_ui::{
    DashboardMetrics, EmergencyContact, NavigationController, NavigationState, TabChange,
};

/// Build the reply service selected by `chat.backend.kind`.
pub fn build_reply_service(chat: &ChatConfig) -> Result<Arc<dyn ReplyService>, ChatError> {
    let service: Arc<dyn ReplyService> = match chat.backend.kind {
        ReplyBackendKind::Simulated => Arc::new(SimulatedReplyService::from_config(&chat.backend)),
        ReplyBackendKind::Http => Arc::new(HttpReplyService::new(
            chat.backend.endpoint.clone(),
            Duration::from_millis(chat.reply_timeout_ms),
        )?),
    };
    tracing::info!(backend = service.name(), "Reply service ready");
    Ok(service)
}

pub struct AppSession {
    config: SolaceConfig,
    navigation: NavigationController,
    conversation: Option<ConversationStore>,
    voice: VoiceControl,
    metrics: DashboardMetrics,
    contacts: Vec<EmergencyContact>,
    service: Arc<dyn ReplyService>,
}

impl AppSession {
    pub fn new(config: SolaceConfig) -> Result<Self, ChatError> {
        let service = build_reply_service(&config.chat)?;
        Ok(Self::with_service(config, service))
    }

    pub fn with_service(config: SolaceConfig, service: Arc<dyn ReplyService>) -> Self {
        let navigation = NavigationController::from_config(&config.navigation);
        let metrics = DashboardMetrics::from_config(&config.dashboard);
        let contacts = contacts_from_config(&config.emergency);
        let mut session = Self {
            config,
            navigation,
            conversation: None,
            voice: VoiceControl::new(),
            metrics,
            contacts,
            service,
        };
        if session.navigation.active_tab() == Tab::Chat {
            session.start_conversation();
        }
        session
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation.state()
    }

    pub fn active_tab(&self) -> Tab {
        self.navigation.active_tab()
    }

    /// Show `tab`, ending or starting the conversation as the panel
    /// change requires.
    pub fn select_tab(&mut self, tab: Tab) -> TabChange {
        let change = self.navigation.select_tab(tab);
        if change.leaves(Tab::Chat) && self.config.chat.end_session_on_leave {
            self.end_session();
        }
        if change.to == Tab::Chat && self.conversation.is_none() {
            self.start_conversation();
        }
        change
    }

    pub fn open_drawer(&mut self) -> bool {
        self.navigation.open_drawer()
    }

    pub fn close_drawer(&mut self) -> bool {
        self.navigation.close_drawer()
    }

    pub fn toggle_drawer(&mut self) -> bool {
        self.navigation.toggle_drawer()
    }

    pub fn set_viewport(&mut self, viewport: ViewportMode) {
        self.navigation.set_viewport(viewport);
    }

    /// The live conversation, if any.
    pub fn conversation(&self) -> Option<&ConversationStore> {
        self.conversation.as_ref()
    }

    pub fn conversation_view(&self) -> Option<ConversationView> {
        self.conversation.as_ref().map(ConversationStore::view)
    }

    /// Submit user input to the live conversation.
    pub fn submit_user_message(&self, text: &str) -> Result<SequenceIndex, ChatError> {
        self.conversation
            .as_ref()
            .ok_or(ChatError::SessionClosed)?
            .append_user_message(text)
    }

    /// End the live conversation. Returns whether there was one.
    pub fn end_session(&mut self) -> bool {
        match self.conversation.take() {
            Some(store) => {
                store.teardown();
                true
            }
            None => false,
        }
    }

    pub fn voice(&self) -> &VoiceControl {
        &self.voice
    }

    pub fn metrics(&self) -> &DashboardMetrics {
        &self.metrics
    }

    pub fn contacts(&self) -> &[EmergencyContact] {
        &self.contacts
    }

    fn start_conversation(&mut self) {
        let store = ConversationStore::new(self.config.chat.clone(), Arc::clone(&self.service));
        tracing::debug!(tab = %self.active_tab(), "Chat panel attached to new conversation");
        self.conversation = Some(store);
    }
}

impl Drop for AppSession {
    fn drop(&mut self) {
        self.end_session();
    }
}
