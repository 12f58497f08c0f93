//! Solace UI crate - panel selection and the read-only data each panel shows.
//!
//! # Modules
//!
//! - [`navigation`]: which panel is active, plus the narrow-viewport drawer
//! - [`dashboard`]: wellness indicators for the Dashboard panel
//! - [`emergency`]: fixed dial targets for the Emergency panel
//! - [`content`]: display-only entries for the Sessions, Community and
//!   Resources panels

pub mod content;
pub mod dashboard;
pub mod emergency;
pub mod navigation;

pub use dashboard::DashboardMetrics;
pub use emergency::EmergencyContact;
pub use navigation::{NavigationController, NavigationState, TabChange};
