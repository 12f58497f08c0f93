use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SolaceError};
use crate::types::{Tab, ViewportMode};

/// Top-level configuration for the Solace client.
///
/// Loaded from `~/.solace/config.toml` by default. Each section corresponds
/// to one component of the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolaceConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub emergency: EmergencyConfig,
}

impl SolaceConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SolaceConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SolaceError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// What to do with a submission that arrives while a reply is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Append the message now and dispatch its reply request once the
    /// in-flight one completes.
    #[default]
    Queue,
    /// Refuse the submission without touching the conversation.
    Reject,
}

/// Conversation session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Assistant message every new conversation starts with.
    pub greeting: String,
    /// Maximum user message length in characters.
    pub max_message_length: usize,
    /// Upper bound on a single reply-service call, in milliseconds.
    pub reply_timeout_ms: u64,
    /// Overlapping submission policy.
    pub overlap_policy: OverlapPolicy,
    /// Tear the conversation down when the user leaves the Chat panel.
    ///
    /// With `false` the conversation outlives panel switches: an
    /// outstanding reply still lands while another panel is shown, and only
    /// an explicit session end or exit tears it down.
    pub end_session_on_leave: bool,
    /// Assistant text appended when the reply service fails.
    pub fallback_text: String,
    /// Reply-generation backend.
    #[serde(default)]
    pub backend: ReplyBackendConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: "Hello, how are you feeling today?".to_string(),
            max_message_length: 2000,
            reply_timeout_ms: 10_000,
            overlap_policy: OverlapPolicy::Queue,
            end_session_on_leave: true,
            fallback_text: "I'm unable to respond right now, please try again.".to_string(),
            backend: ReplyBackendConfig::default(),
        }
    }
}

/// Which reply-generation service backs the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyBackendKind {
    /// Local fixed-latency reflection.
    #[default]
    Simulated,
    /// JSON request/response over HTTP.
    Http,
}

/// Failure the simulated backend reports instead of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InjectedFailure {
    #[default]
    None,
    Upstream,
    Timeout,
}

/// Reply-generation backend sub-configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplyBackendConfig {
    pub kind: ReplyBackendKind,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
    /// Failure injection for the simulated backend.
    pub inject_failure: InjectedFailure,
    /// Endpoint for the HTTP backend.
    pub endpoint: String,
}

impl Default for ReplyBackendConfig {
    fn default() -> Self {
        Self {
            kind: ReplyBackendKind::Simulated,
            latency_ms: 1000,
            inject_failure: InjectedFailure::None,
            endpoint: "http://127.0.0.1:8080/reply".to_string(),
        }
    }
}

/// Navigation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Presentation mode at startup.
    pub viewport: ViewportMode,
    /// Panel shown at startup.
    pub initial_tab: Tab,
}

/// Wellness indicators shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Mood score, 0-100.
    pub mood_score: u8,
    pub weekly_checkins: u32,
    pub next_session_label: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mood_score: 72,
            weekly_checkins: 4,
            next_session_label: "Thursday, 3:00 PM".to_string(),
        }
    }
}

/// A fixed emergency dial target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContactConfig {
    pub label: String,
    pub dial_target: String,
}

/// Emergency panel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyConfig {
    pub contacts: Vec<EmergencyContactConfig>,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            contacts: vec![
                EmergencyContactConfig {
                    label: "Suicide & Crisis Lifeline".to_string(),
                    dial_target: "988".to_string(),
                },
                EmergencyContactConfig {
                    label: "Emergency Services".to_string(),
                    dial_target: "911".to_string(),
                },
            ],
        }
    }
}
