//! Tab Set
//!
//! Owns the managed panes and buttons of one page and enforces the
//! single-active invariant on activation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::TabError;
use crate::pane::{ButtonId, Pane, PaneKey, TabButton, UnkeyedPane};
use crate::state::TabState;
use crate::Result;

/// Outcome of a synchronous activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub pane: PaneKey,
    pub button: ButtonId,
    /// Generation of the pane after this activation
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct TabSet {
    /// Page instance identifier, used in log fields
    page_id: String,
    panes: Vec<Pane>,
    /// `.tab-content` regions without an id; hidden with the rest, never shown
    unkeyed: Vec<UnkeyedPane>,
    buttons: Vec<TabButton>,
    state: TabState,
}

impl TabSet {
    pub fn new() -> Self {
        Self {
            page_id: Uuid::new_v4().to_string(),
            panes: Vec::new(),
            unkeyed: Vec::new(),
            buttons: Vec::new(),
            state: TabState::NoTabActive,
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn state(&self) -> &TabState {
        &self.state
    }

    /// Register a hidden pane. Pane keys are unique within a set.
    pub fn add_pane(&mut self, key: PaneKey, inner_html: impl Into<String>) -> Result<&Pane> {
        self.insert_pane(key, inner_html, true)
    }

    pub(crate) fn insert_pane(
        &mut self,
        key: PaneKey,
        inner_html: impl Into<String>,
        hidden: bool,
    ) -> Result<&Pane> {
        if self.panes.iter().any(|p| p.key == key) {
            return Err(TabError::DuplicatePane(key.to_string()));
        }
        let mut pane = Pane::new(key, inner_html);
        pane.set_hidden(hidden);
        self.panes.push(pane);
        let index = self.panes.len() - 1;
        Ok(&self.panes[index])
    }

    pub(crate) fn insert_unkeyed_pane(&mut self, inner_html: impl Into<String>, hidden: bool) {
        self.unkeyed.push(UnkeyedPane {
            hidden,
            inner_html: inner_html.into(),
        });
    }

    /// Register a tab-strip button; ids are assigned in insertion order.
    pub fn add_button(&mut self, target: Option<PaneKey>, label: impl Into<String>) -> ButtonId {
        self.insert_button(target, label, true, false)
    }

    /// Register a button that lives outside the tab strip, e.g. a "next day"
    /// link in a footer. It activates panes but is never auto-clicked.
    pub fn add_loose_button(&mut self, target: Option<PaneKey>, label: impl Into<String>) -> ButtonId {
        self.insert_button(target, label, false, false)
    }

    pub(crate) fn insert_button(
        &mut self,
        target: Option<PaneKey>,
        label: impl Into<String>,
        in_strip: bool,
        active: bool,
    ) -> ButtonId {
        let id = ButtonId(self.buttons.len());
        let mut button = TabButton::new(id, target, label, in_strip);
        button.active = active;
        self.buttons.push(button);
        id
    }

    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    pub fn pane(&self, key: &PaneKey) -> Result<&Pane> {
        self.panes
            .iter()
            .find(|p| &p.key == key)
            .ok_or_else(|| TabError::PaneNotFound(key.to_string()))
    }

    pub fn button(&self, id: ButtonId) -> Result<&TabButton> {
        self.buttons.get(id.0).ok_or(TabError::ButtonNotFound(id.0))
    }

    pub fn unkeyed_panes(&self) -> &[UnkeyedPane] {
        &self.unkeyed
    }

    /// First button in the tab strip
    pub fn first_button(&self) -> Option<&TabButton> {
        self.buttons.iter().find(|b| b.in_strip)
    }

    fn pane_index(&self, key: &PaneKey) -> Result<usize> {
        self.panes
            .iter()
            .position(|p| &p.key == key)
            .ok_or_else(|| TabError::PaneNotFound(key.to_string()))
    }

    /// Make `key` the only visible pane and `button` the only active button.
    ///
    /// Both lookups are checked before anything is mutated, so a failed
    /// activation leaves the set exactly as it was.
    pub fn activate(&mut self, button: ButtonId, key: &PaneKey) -> Result<Selection> {
        let pane_index = self.pane_index(key)?;
        self.button(button)?;

        let next = TabState::TabActive(key.clone());
        debug_assert!(self.state.can_transition_to(&next));

        for pane in &mut self.panes {
            pane.set_hidden(true);
        }
        for pane in &mut self.unkeyed {
            pane.hidden = true;
        }
        for b in &mut self.buttons {
            b.active = false;
        }

        let pane = &mut self.panes[pane_index];
        pane.set_hidden(false);
        pane.generation += 1;
        let generation = pane.generation;
        self.buttons[button.0].active = true;

        tracing::debug!(
            page_id = %self.page_id,
            from = %self.state,
            to = %next,
            "Tab state transition"
        );
        self.state = next;

        Ok(Selection {
            pane: key.clone(),
            button,
            generation,
        })
    }

    /// Replace the pane's markup if `generation` is still current.
    ///
    /// Returns `Ok(false)` when a newer activation superseded the load.
    pub fn apply_content(&mut self, key: &PaneKey, generation: u64, html: String) -> Result<bool> {
        let index = self.pane_index(key)?;
        let pane = &mut self.panes[index];
        if pane.generation != generation {
            return Ok(false);
        }
        pane.set_content(html);
        Ok(true)
    }

    pub fn visible_count(&self) -> usize {
        let keyed = self.panes.iter().filter(|p| p.is_visible()).count();
        keyed + self.unkeyed.iter().filter(|p| !p.hidden).count()
    }

    pub fn active_count(&self) -> usize {
        self.buttons.iter().filter(|b| b.active).count()
    }

    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            page_id: self.page_id.clone(),
            state: self.state.clone(),
            panes: self
                .panes
                .iter()
                .map(|p| PaneSnapshot {
                    key: p.key.clone(),
                    visible: p.is_visible(),
                    generation: p.generation,
                    inner_html: p.inner_html.clone(),
                    updated_at: p.updated_at,
                })
                .collect(),
            unkeyed_visible: self.unkeyed.iter().filter(|p| !p.hidden).count(),
            buttons: self
                .buttons
                .iter()
                .map(|b| ButtonSnapshot {
                    id: b.id,
                    target: b.target.clone(),
                    active: b.active,
                    in_strip: b.in_strip,
                })
                .collect(),
        }
    }
}

impl Default for TabSet {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TabSnapshot {
    pub page_id: String,
    pub state: TabState,
    pub panes: Vec<PaneSnapshot>,
    /// Visible `.tab-content` regions without an id
    pub unkeyed_visible: usize,
    pub buttons: Vec<ButtonSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaneSnapshot {
    pub key: PaneKey,
    pub visible: bool,
    pub generation: u64,
    pub inner_html: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButtonSnapshot {
    pub id: ButtonId,
    pub target: Option<PaneKey>,
    pub active: bool,
    pub in_strip: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> PaneKey {
        PaneKey::new(s).unwrap()
    }

    fn three_days() -> TabSet {
        let mut tabs = TabSet::new();
        for day in ["day1", "day2", "day3"] {
            tabs.add_pane(key(day), "").unwrap();
            tabs.add_button(Some(key(day)), day);
        }
        tabs
    }

    #[test]
    fn test_activation_keeps_single_active() {
        let mut tabs = three_days();
        assert_eq!(tabs.state(), &TabState::NoTabActive);

        let sequence = [(0, "day1"), (2, "day3"), (1, "day2"), (1, "day2"), (0, "day1")];
        for (button, day) in sequence {
            tabs.activate(ButtonId(button), &key(day)).unwrap();
            assert_eq!(tabs.visible_count(), 1);
            assert_eq!(tabs.active_count(), 1);
            assert!(tabs.pane(&key(day)).unwrap().is_visible());
            assert!(tabs.button(ButtonId(button)).unwrap().active);
            assert_eq!(tabs.state(), &TabState::TabActive(key(day)));
        }
    }

    #[test]
    fn test_repeat_activation_is_idempotent() {
        let mut tabs = three_days();
        tabs.activate(ButtonId(1), &key("day2")).unwrap();
        let before = tabs.snapshot();
        tabs.activate(ButtonId(1), &key("day2")).unwrap();
        let after = tabs.snapshot();

        let visible = |s: &TabSnapshot| s.panes.iter().map(|p| p.visible).collect::<Vec<_>>();
        let active = |s: &TabSnapshot| s.buttons.iter().map(|b| b.active).collect::<Vec<_>>();
        assert_eq!(visible(&before), visible(&after));
        assert_eq!(active(&before), active(&after));
        // Each activation still counts as a new load generation
        assert_eq!(tabs.pane(&key("day2")).unwrap().generation, 2);
    }

    #[test]
    fn test_missing_pane_leaves_set_untouched() {
        let mut tabs = three_days();
        tabs.activate(ButtonId(0), &key("day1")).unwrap();

        let err = tabs.activate(ButtonId(1), &key("day9")).unwrap_err();
        assert_eq!(err, TabError::PaneNotFound("day9".to_string()));
        assert!(tabs.pane(&key("day1")).unwrap().is_visible());
        assert!(tabs.button(ButtonId(0)).unwrap().active);
        assert_eq!(tabs.state(), &TabState::TabActive(key("day1")));
    }

    #[test]
    fn test_missing_button_leaves_set_untouched() {
        let mut tabs = three_days();
        let err = tabs.activate(ButtonId(7), &key("day1")).unwrap_err();
        assert_eq!(err, TabError::ButtonNotFound(7));
        assert_eq!(tabs.visible_count(), 0);
        assert_eq!(tabs.state(), &TabState::NoTabActive);
    }

    #[test]
    fn test_duplicate_pane_rejected() {
        let mut tabs = three_days();
        assert!(matches!(
            tabs.add_pane(key("day2"), ""),
            Err(TabError::DuplicatePane(_))
        ));
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut tabs = three_days();
        let first = tabs.activate(ButtonId(0), &key("day1")).unwrap();
        let second = tabs.activate(ButtonId(0), &key("day1")).unwrap();

        assert_eq!(second.generation, first.generation + 1);
        assert!(tabs
            .apply_content(&key("day1"), second.generation, "new".into())
            .unwrap());
        assert!(!tabs
            .apply_content(&key("day1"), first.generation, "old".into())
            .unwrap());
        assert_eq!(tabs.pane(&key("day1")).unwrap().inner_html, "new");
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut tabs = three_days();
        tabs.activate(ButtonId(2), &key("day3")).unwrap();
        let json = serde_json::to_value(tabs.snapshot()).unwrap();
        assert_eq!(json["state"]["pane"], "day3");
        assert_eq!(json["panes"][2]["visible"], true);
        assert_eq!(json["buttons"][0]["active"], false);
        assert!(json["panes"][2]["updated_at"].is_string());
    }

    #[test]
    fn test_activation_updates_timestamp() {
        let mut tabs = three_days();
        let before = tabs.pane(&key("day2")).unwrap().updated_at;
        tabs.activate(ButtonId(1), &key("day2")).unwrap();
        let snapshot = tabs.snapshot();
        assert!(snapshot.panes[1].updated_at >= before);
        assert_eq!(snapshot.panes[1].updated_at, tabs.pane(&key("day2")).unwrap().updated_at);
    }

    #[test]
    fn test_loose_button_activates_but_is_not_first() {
        let mut tabs = TabSet::new();
        tabs.add_pane(key("day1"), "").unwrap();
        tabs.add_pane(key("day2"), "").unwrap();
        let next = tabs.add_loose_button(Some(key("day2")), "Next day");
        let strip = tabs.add_button(Some(key("day1")), "Day 1");

        assert_eq!(tabs.first_button().unwrap().id, strip);

        tabs.activate(next, &key("day2")).unwrap();
        assert!(tabs.button(next).unwrap().active);
        tabs.activate(strip, &key("day1")).unwrap();
        assert!(!tabs.button(next).unwrap().active);
        assert_eq!(tabs.active_count(), 1);
    }

    #[test]
    fn test_unkeyed_panes_are_hidden_on_activation() {
        let mut tabs = three_days();
        tabs.insert_unkeyed_pane("<p>stray</p>", false);
        assert_eq!(tabs.visible_count(), 1);

        tabs.activate(ButtonId(0), &key("day1")).unwrap();
        assert_eq!(tabs.visible_count(), 1);
        assert!(tabs.unkeyed_panes()[0].hidden);
        assert_eq!(tabs.snapshot().unkeyed_visible, 0);
    }
}
