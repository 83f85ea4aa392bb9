//! Tab State Machine
//!
//! ```text
//! NoTabActive
//!   ↓ activate(k)
//! TabActive(k) ──activate(j)──▶ TabActive(j)
//! ```
//!
//! There is no way back to `NoTabActive`: once a tab is active one always is.

use serde::{Deserialize, Serialize};

use crate::pane::PaneKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "pane", rename_all = "snake_case")]
pub enum TabState {
    /// Nothing has been activated yet
    #[default]
    NoTabActive,
    /// The given pane is visible and its button active
    TabActive(PaneKey),
}

impl TabState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: &TabState) -> bool {
        match (self, target) {
            (_, TabState::TabActive(_)) => true,
            (TabState::NoTabActive, TabState::NoTabActive) => true,
            (TabState::TabActive(_), TabState::NoTabActive) => false,
        }
    }
}

impl std::fmt::Display for TabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabState::NoTabActive => write!(f, "no-tab-active"),
            TabState::TabActive(key) => write!(f, "tab-active({})", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> PaneKey {
        PaneKey::new(s).unwrap()
    }

    #[test]
    fn test_valid_transitions() {
        // NoTabActive -> TabActive
        assert!(TabState::NoTabActive.can_transition_to(&TabState::TabActive(key("day1"))));
        // TabActive -> TabActive (switch)
        assert!(TabState::TabActive(key("day1")).can_transition_to(&TabState::TabActive(key("day2"))));
        // TabActive -> same TabActive (re-click)
        assert!(TabState::TabActive(key("day1")).can_transition_to(&TabState::TabActive(key("day1"))));
    }

    #[test]
    fn test_no_way_back_to_inactive() {
        assert!(!TabState::TabActive(key("day1")).can_transition_to(&TabState::NoTabActive));
    }

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_string(&TabState::TabActive(key("day2"))).unwrap();
        assert_eq!(json, r#"{"state":"tab_active","pane":"day2"}"#);

        let json = serde_json::to_string(&TabState::NoTabActive).unwrap();
        assert_eq!(json, r#"{"state":"no_tab_active"}"#);
    }
}
