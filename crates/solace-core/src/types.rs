//! Value types shared across the Solace crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SolaceError;

/// Who wrote a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::User => write!(f, "You"),
            Author::Assistant => write!(f, "Assistant"),
        }
    }
}

/// Position of a message in its conversation timeline.
///
/// Assigned synchronously at append time; strictly increasing with no gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceIndex(pub u64);

impl SequenceIndex {
    /// The index following this one.
    pub fn next(self) -> Self {
        SequenceIndex(self.0 + 1)
    }
}

impl fmt::Display for SequenceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed set of top-level panels the client can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Chat,
    Sessions,
    Community,
    Resources,
    Emergency,
}

impl Tab {
    /// Every panel, in menu order.
    pub const ALL: [Tab; 6] = [
        Tab::Dashboard,
        Tab::Chat,
        Tab::Sessions,
        Tab::Community,
        Tab::Resources,
        Tab::Emergency,
    ];

    /// Lowercase identifier used in config files and commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Chat => "chat",
            Tab::Sessions => "sessions",
            Tab::Community => "community",
            Tab::Resources => "resources",
            Tab::Emergency => "emergency",
        }
    }

    /// Human-readable menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Chat => "AI Chat",
            Tab::Sessions => "Sessions",
            Tab::Community => "Community",
            Tab::Resources => "Resources",
            Tab::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = SolaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == wanted)
            .ok_or_else(|| SolaceError::UnknownTab(s.to_string()))
    }
}

/// Presentation mode of the host viewport.
///
/// The navigation drawer only exists in `Narrow` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    #[default]
    Wide,
    Narrow,
}
