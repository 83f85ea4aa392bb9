//! Pane and tab button data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::Result;

/// Identifier of a pane, also the `id` of the fragment section to load into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaneKey(String);

impl PaneKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() || key.chars().any(char::is_whitespace) {
            return Err(TabError::InvalidKey(key));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaneKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PaneKey {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for PaneKey {
    type Error = TabError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PaneKey> for String {
    fn from(key: PaneKey) -> Self {
        key.0
    }
}

impl AsRef<str> for PaneKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Position of a button among the managed tab buttons, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonId(pub usize);

impl std::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pane {
    pub key: PaneKey,
    /// Hidden panes are not rendered
    pub hidden: bool,
    /// Markup currently shown inside the pane
    pub inner_html: String,
    /// Last time visibility or content changed
    pub updated_at: DateTime<Utc>,
    /// Bumped on every activation; fragment loads carry the value they started with
    pub generation: u64,
}

impl Pane {
    pub fn new(key: PaneKey, inner_html: impl Into<String>) -> Self {
        Self {
            key,
            hidden: true,
            inner_html: inner_html.into(),
            updated_at: Utc::now(),
            generation: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        if self.hidden != hidden {
            self.hidden = hidden;
            self.updated_at = Utc::now();
        }
    }

    pub(crate) fn set_content(&mut self, html: String) {
        self.inner_html = html;
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabButton {
    pub id: ButtonId,
    /// Pane this button opens, when the markup names one
    pub target: Option<PaneKey>,
    pub label: String,
    pub active: bool,
    /// Sits in the tab strip; the first such button opens on page load
    pub in_strip: bool,
}

impl TabButton {
    pub fn new(id: ButtonId, target: Option<PaneKey>, label: impl Into<String>, in_strip: bool) -> Self {
        Self {
            id,
            target,
            label: label.into(),
            active: false,
            in_strip,
        }
    }
}

/// A `.tab-content` region without an id: hidden on every activation, never shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnkeyedPane {
    pub hidden: bool,
    pub inner_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_validation() {
        assert!(PaneKey::new("day1").is_ok());
        assert!(PaneKey::new("labs-day1").is_ok());
        assert_eq!(PaneKey::new(""), Err(TabError::InvalidKey(String::new())));
        assert!(PaneKey::new("day 1").is_err());
    }

    #[test]
    fn test_key_deserialize_rejects_empty() {
        let ok: PaneKey = serde_json::from_str(r#""day3""#).unwrap();
        assert_eq!(ok.as_str(), "day3");
        assert!(serde_json::from_str::<PaneKey>(r#""""#).is_err());
    }

    #[test]
    fn test_new_pane_starts_hidden() {
        let pane = Pane::new(PaneKey::new("day1").unwrap(), "<p>hi</p>");
        assert!(!pane.is_visible());
        assert_eq!(pane.generation, 0);
        assert_eq!(pane.inner_html, "<p>hi</p>");
    }
}
