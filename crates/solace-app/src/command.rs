//! Parsing of terminal input lines.

use solace_core::error::SolaceError;
use solace_core::types::{Tab, ViewportMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerAction {
    Open,
    Close,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Drawer(DrawerAction),
    Viewport(ViewportMode),
    Voice,
    End,
    Help,
    Quit,
    /// Free text for the conversation.
    Say(String),
    Nothing,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: /{0} (try /help)")]
    Unknown(String),

    #[error("/{0} needs an argument (try /help)")]
    MissingArgument(&'static str),

    #[error("Unknown {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },

    #[error(transparent)]
    Tab(#[from] SolaceError),
}

pub const HELP: &str = "\
Commands:
  /tab <dashboard|chat|sessions|community|resources|emergency>
  /drawer [open|close|toggle]
  /viewport <wide|narrow>
  /voice      start voice input
  /end        end the current conversation
  /help       show this help
  /quit       exit
Anything else is sent to the assistant while the chat panel is open.";

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        if line.is_empty() {
            return Ok(Command::Nothing);
        }
        return Ok(Command::Say(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default().to_lowercase();
    let arg = words.next();

    match name.as_str() {
        "tab" => {
            let arg = arg.ok_or(CommandError::MissingArgument("tab"))?;
            Ok(Command::Tab(arg.parse()?))
        }
        "drawer" => {
            let action = match arg.map(str::to_lowercase).as_deref() {
                None | Some("toggle") => DrawerAction::Toggle,
                Some("open") => DrawerAction::Open,
                Some("close") => DrawerAction::Close,
                Some(other) => {
                    return Err(CommandError::InvalidArgument {
                        what: "drawer action",
                        value: other.to_string(),
                    })
                }
            };
            Ok(Command::Drawer(action))
        }
        "viewport" => match arg.map(str::to_lowercase).as_deref() {
            Some("wide") => Ok(Command::Viewport(ViewportMode::Wide)),
            Some("narrow") => Ok(Command::Viewport(ViewportMode::Narrow)),
            Some(other) => Err(CommandError::InvalidArgument {
                what: "viewport",
                value: other.to_string(),
            }),
            None => Err(CommandError::MissingArgument("viewport")),
        },
        "voice" => Ok(Command::Voice),
        "end" => Ok(Command::End),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}
