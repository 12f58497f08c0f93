//! Navigation state machine.
//!
//! Tracks the active panel and the drawer that replaces the sidebar on
//! narrow viewports. There is no terminal state:
//! - any panel -> any panel (`select_tab`, always closes the drawer)
//! - drawer closed <-> open (`open_drawer` / `close_drawer` are idempotent)
//! - switching to a wide viewport closes the drawer

use std::fmt;

use solace_core::config::NavigationConfig;
use solace_core::types::{Tab, ViewportMode};

/// Snapshot of the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub active_tab: Tab,
    pub drawer_open: bool,
    pub viewport: ViewportMode,
}

impl NavigationState {
    /// Whether the drawer is actually on screen.
    pub fn drawer_visible(&self) -> bool {
        self.drawer_open && self.viewport == ViewportMode::Narrow
    }
}

/// Result of a `select_tab` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabChange {
    pub from: Tab,
    pub to: Tab,
}

impl TabChange {
    /// True when this change moves away from `tab`.
    pub fn leaves(&self, tab: Tab) -> bool {
        self.from == tab && self.to != tab
    }

    /// True when this change moves onto `tab` from elsewhere.
    pub fn enters(&self, tab: Tab) -> bool {
        self.from != tab && self.to == tab
    }
}

impl fmt::Display for TabChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Owner of the navigation state; all mutation goes through its methods.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    pub fn new(initial_tab: Tab, viewport: ViewportMode) -> Self {
        Self {
            state: NavigationState {
                active_tab: initial_tab,
                drawer_open: false,
                viewport,
            },
        }
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(config.initial_tab, config.viewport)
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn active_tab(&self) -> Tab {
        self.state.active_tab
    }

    pub fn drawer_open(&self) -> bool {
        self.state.drawer_open
    }

    pub fn viewport(&self) -> ViewportMode {
        self.state.viewport
    }

    /// Show `tab`. Selecting a destination always dismisses the drawer.
    pub fn select_tab(&mut self, tab: Tab) -> TabChange {
        let change = TabChange {
            from: self.state.active_tab,
            to: tab,
        };
        self.state.active_tab = tab;
        if self.state.drawer_open {
            self.state.drawer_open = false;
            tracing::debug!("Navigation drawer closed by selection");
        }
        tracing::debug!(tab = %tab, "Navigation: {}", change);
        change
    }

    /// Open the drawer. Returns whether anything changed.
    pub fn open_drawer(&mut self) -> bool {
        if self.state.drawer_open {
            return false;
        }
        self.state.drawer_open = true;
        tracing::debug!("Navigation drawer opened");
        true
    }

    /// Close the drawer. Returns whether anything changed.
    pub fn close_drawer(&mut self) -> bool {
        if !self.state.drawer_open {
            return false;
        }
        self.state.drawer_open = false;
        tracing::debug!("Navigation drawer closed");
        true
    }

    /// Flip the drawer and return its new state.
    pub fn toggle_drawer(&mut self) -> bool {
        if self.state.drawer_open {
            self.close_drawer();
        } else {
            self.open_drawer();
        }
        self.state.drawer_open
    }

    /// Change presentation mode; leaving narrow mode closes the drawer.
    pub fn set_viewport(&mut self, viewport: ViewportMode) {
        self.state.viewport = viewport;
        if viewport == ViewportMode::Wide {
            self.close_drawer();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let nav = NavigationController::default();
        assert_eq!(nav.active_tab(), Tab::Dashboard);
        assert!(!nav.drawer_open());
        assert_eq!(nav.viewport(), ViewportMode::Wide);
    }

    #[test]
    fn test_from_config() {
        let config = NavigationConfig {
            viewport: ViewportMode::Narrow,
            initial_tab: Tab::Emergency,
        };
        let nav = NavigationController::from_config(&config);
        assert_eq!(nav.active_tab(), Tab::Emergency);
        assert_eq!(nav.viewport(), ViewportMode::Narrow);
    }

    #[test]
    fn test_select_every_tab_closes_drawer() {
        for tab in Tab::ALL {
            let mut nav = NavigationController::new(Tab::Dashboard, ViewportMode::Narrow);
            nav.open_drawer();
            nav.select_tab(tab);
            assert_eq!(nav.active_tab(), tab);
            assert!(!nav.drawer_open());
        }
    }

    #[test]
    fn test_select_tab_reports_change() {
        let mut nav = NavigationController::default();
        let change = nav.select_tab(Tab::Chat);
        assert_eq!(change.from, Tab::Dashboard);
        assert_eq!(change.to, Tab::Chat);
        assert!(change.enters(Tab::Chat));
        assert!(change.leaves(Tab::Dashboard));
        assert_eq!(change.to_string(), "dashboard -> chat");

        let same = nav.select_tab(Tab::Chat);
        assert!(!same.leaves(Tab::Chat));
        assert!(!same.enters(Tab::Chat));
    }

    #[test]
    fn test_open_drawer_is_idempotent() {
        let mut nav = NavigationController::new(Tab::Dashboard, ViewportMode::Narrow);
        assert!(nav.open_drawer());
        assert!(!nav.open_drawer());
        assert!(nav.drawer_open());
    }

    #[test]
    fn test_close_drawer_is_idempotent() {
        let mut nav = NavigationController::default();
        assert!(!nav.close_drawer());
        nav.open_drawer();
        assert!(nav.close_drawer());
        assert!(!nav.drawer_open());
    }

    #[test]
    fn test_toggle_drawer() {
        let mut nav = NavigationController::default();
        assert!(nav.toggle_drawer());
        assert!(!nav.toggle_drawer());
        assert!(!nav.drawer_open());
    }

    #[test]
    fn test_drawer_visible_only_when_narrow() {
        let mut nav = NavigationController::new(Tab::Dashboard, ViewportMode::Narrow);
        nav.open_drawer();
        assert!(nav.state().drawer_visible());

        nav.set_viewport(ViewportMode::Wide);
        assert!(!nav.drawer_open());
        assert!(!nav.state().drawer_visible());

        nav.open_drawer();
        assert!(nav.drawer_open());
        assert!(!nav.state().drawer_visible());
    }

    #[test]
    fn test_switch_to_narrow_keeps_drawer_closed() {
        let mut nav = NavigationController::default();
        nav.set_viewport(ViewportMode::Narrow);
        assert!(!nav.drawer_open());
        assert_eq!(nav.viewport(), ViewportMode::Narrow);
    }
}
