//! Voice input control for the chat panel.
//!
//! The chat panel shows a microphone control, but no capture or
//! transcription backend exists on any platform. The control reports itself
//! unavailable so the presentation layer can explain why nothing happens.

use crate::error::ChatError;

/// State behind the chat panel's microphone button.
#[derive(Debug, Default, Clone, Copy)]
pub struct VoiceControl;

impl VoiceControl {
    pub fn new() -> Self {
        Self
    }

    /// Whether voice capture can be started here.
    pub fn is_available(&self) -> bool {
        false
    }

    /// Begin capturing speech.
    pub fn start_listening(&self) -> Result<(), ChatError> {
        tracing::debug!("Voice capture requested but not supported");
        Err(ChatError::VoiceUnavailable(
            "voice input is not supported yet".to_string(),
        ))
    }
}
