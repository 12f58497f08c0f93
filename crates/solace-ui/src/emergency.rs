//! Emergency panel dial targets.
//!
//! Dialing itself belongs to the host operating environment; this module
//! only supplies what to show and which target each control invokes.

use solace_core::config::EmergencyConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyContact {
    pub label: String,
    pub dial_target: String,
}

impl EmergencyContact {
    /// `tel:` URI the host can hand to its dialer.
    pub fn dial_uri(&self) -> String {
        let digits: String = self
            .dial_target
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{}", digits)
    }
}

/// Contacts from configuration; blank entries are skipped.
pub fn contacts_from_config(config: &EmergencyConfig) -> Vec<EmergencyContact> {
    let contacts: Vec<EmergencyContact> = config
        .contacts
        .iter()
        .filter(|c| !c.label.trim().is_empty() && !c.dial_target.trim().is_empty())
        .map(|c| EmergencyContact {
            label: c.label.trim().to_string(),
            dial_target: c.dial_target.trim().to_string(),
        })
        .collect();
    if contacts.len() != config.contacts.len() {
        tracing::warn!(
            configured = config.contacts.len(),
            kept = contacts.len(),
            "Skipped blank emergency contacts"
        );
    }
    contacts
}
