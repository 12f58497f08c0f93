//! Text rendering for the terminal front end.

use std::fmt::Write as _;
use std::sync::Mutex;

use solace_chat::{ConversationView, Message, ScrollHost};
use solace_core::types::{Author, SequenceIndex, Tab, ViewportMode};
use solace_ui::content::{COMMUNITY_POSTS, RESOURCES, SESSIONS};

use crate::session::AppSession;

pub const TYPING_INDICATOR: &str = "  Assistant is typing...";

pub fn render_message(message: &Message) -> String {
    let marker = match message.author {
        Author::User => ">",
        Author::Assistant => "<",
    };
    let suffix = if message.fallback { " (not delivered)" } else { "" };
    format!("{} {}: {}{}", marker, message.author, message.text, suffix)
}

/// Navigation bar. Wide layouts list every panel; narrow layouts show a
/// drawer button and list the panels only while the drawer is open.
pub fn render_navigation(session: &AppSession) -> String {
    let nav = session.navigation();
    let entries = || {
        Tab::ALL
            .iter()
            .map(|tab| {
                if *tab == nav.active_tab {
                    format!("[{}]", tab.label())
                } else {
                    tab.label().to_string()
                }
            })
            .collect::<Vec<_>>()
    };
    match nav.viewport {
        ViewportMode::Wide => entries().join(" | "),
        ViewportMode::Narrow if nav.drawer_visible() => {
            format!("= Menu\n  {}", entries().join("\n  "))
        }
        ViewportMode::Narrow => format!("= {}", nav.active_tab.label()),
    }
}

/// Full text of the active panel.
pub fn render_panel(session: &AppSession) -> String {
    let mut out = render_navigation(session);
    out.push_str("\n\n");
    let tab = session.active_tab();
    let _ = writeln!(out, "== {} ==", tab.label());

    match tab {
        Tab::Dashboard => {
            let metrics = session.metrics();
            let _ = writeln!(
                out,
                "Mood score: {}/100 ({})",
                metrics.mood_score(),
                metrics.mood_label()
            );
            let _ = writeln!(out, "Check-ins this week: {}", metrics.weekly_checkins());
            let _ = writeln!(out, "Next session: {}", metrics.next_session_label());
        }
        Tab::Chat => match session.conversation_view() {
            Some(view) => {
                for message in view.messages() {
                    let _ = writeln!(out, "{}", render_message(&message));
                }
                if view.pending_reply() {
                    let _ = writeln!(out, "{}", TYPING_INDICATOR);
                }
                out.push_str("(type a message, /voice for the microphone)\n");
            }
            None => out.push_str("The conversation has ended. Use /tab chat to start again.\n"),
        },
        Tab::Sessions => {
            for entry in SESSIONS {
                let _ = writeln!(
                    out,
                    "- {} with {}, {}",
                    entry.title, entry.counselor, entry.when
                );
            }
        }
        Tab::Community => {
            for post in COMMUNITY_POSTS {
                let _ = writeln!(out, "- {}: {}", post.author, post.body);
            }
        }
        Tab::Resources => {
            for resource in RESOURCES {
                let _ = writeln!(out, "- {}: {}", resource.title, resource.summary);
            }
        }
        Tab::Emergency => {
            out.push_str("If you are in danger, reach out now.\n");
            for contact in session.contacts() {
                let _ = writeln!(
                    out,
                    "- {}: {} ({})",
                    contact.label,
                    contact.dial_target,
                    contact.dial_uri()
                );
            }
        }
    }
    out
}

struct Shown {
    last: Option<SequenceIndex>,
    typing: bool,
}

/// Scroll host for a line-oriented terminal: "scrolling to the latest"
/// means printing whatever arrived since the last request.
pub struct TerminalHost<F>
where
    F: Fn(&str) + Send + Sync,
{
    view: ConversationView,
    shown: Mutex<Shown>,
    emit: F,
}

impl<F> TerminalHost<F>
where
    F: Fn(&str) + Send + Sync,
{
    /// Treat everything currently in `view` as already on screen.
    pub fn new(view: ConversationView, emit: F) -> Self {
        let shown = Shown {
            last: view.messages().last().map(|m| m.index),
            typing: view.pending_reply(),
        };
        Self {
            view,
            shown: Mutex::new(shown),
            emit,
        }
    }
}

impl<F> ScrollHost for TerminalHost<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn scroll_to_latest(&self) {
        let mut shown = match self.shown.lock() {
            Ok(shown) => shown,
            Err(e) => {
                tracing::error!(error = %e, "Terminal host state poisoned");
                return;
            }
        };
        for message in self.view.messages_after(shown.last) {
            (self.emit)(&render_message(&message));
            shown.last = Some(message.index);
        }
        let pending = self.view.pending_reply();
        if pending && !shown.typing {
            (self.emit)(TYPING_INDICATOR);
        }
        shown.typing = pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use solace_chat::{SimulatedReplyService, ViewportSync};
    use solace_core::config::SolaceConfig;

    fn session(tab: Tab) -> AppSession {
        let mut config = SolaceConfig::default();
        config.navigation.initial_tab = tab;
        AppSession::with_service(
            config,
            Arc::new(SimulatedReplyService::new(Duration::from_millis(500))),
        )
    }

    fn capture() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        (lines, move |line: &str| {
            sink.lock().unwrap().push(line.to_string());
        })
    }

    #[test]
    fn test_render_message_marks_fallback() {
        let mut session = session(Tab::Dashboard);
        session.select_tab(Tab::Chat);
        let messages = session.conversation().unwrap().messages();
        let greeting = &messages[0];
        assert_eq!(
            render_message(greeting),
            "< Assistant: Hello, how are you feeling today?"
        );
        let mut failed = greeting.clone();
        failed.fallback = true;
        assert!(render_message(&failed).ends_with("(not delivered)"));
    }

    #[test]
    fn test_dashboard_panel_shows_metrics() {
        let text = render_panel(&session(Tab::Dashboard));
        assert!(text.contains("[Dashboard]"));
        assert!(text.contains("Mood score: 72/100"));
        assert!(text.contains("Thursday, 3:00 PM"));
    }

    #[test]
    fn test_emergency_panel_lists_dial_targets() {
        let text = render_panel(&session(Tab::Emergency));
        assert!(text.contains("988"));
        assert!(text.contains("tel:911"));
    }

    #[test]
    fn test_static_panels_render_entries() {
        assert!(render_panel(&session(Tab::Resources)).contains("Box breathing"));
        assert!(render_panel(&session(Tab::Sessions)).contains("Weekly check-in"));
        assert!(render_panel(&session(Tab::Community)).contains("Small win"));
    }

    #[test]
    fn test_narrow_navigation_follows_drawer() {
        let mut session = session(Tab::Resources);
        session.set_viewport(ViewportMode::Narrow);
        assert_eq!(render_navigation(&session), "= Resources");
        session.open_drawer();
        assert!(render_navigation(&session).contains("[Resources]"));
        assert!(render_navigation(&session).contains("AI Chat"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_host_prints_exchange_once() {
        let session = session(Tab::Chat);
        let view = session.conversation_view().unwrap();
        let (lines, emit) = capture();
        let events = view.subscribe();
        let sync = ViewportSync::new(TerminalHost::new(view.clone(), emit), &view);
        let task = tokio::spawn(sync.run(events, view.clone()));

        session.submit_user_message("I am anxious.").unwrap();
        view.wait_for_reply().await;
        drop(session);
        task.await.unwrap();

        let lines = lines.lock().unwrap().clone();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "> You: I am anxious.");
        assert_eq!(lines[1], TYPING_INDICATOR);
        assert!(lines[2].starts_with("< Assistant:"));
        assert!(lines[2].contains("anxious"));
    }
}
