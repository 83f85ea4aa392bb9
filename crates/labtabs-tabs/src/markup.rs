//! Building a tab set from page markup
//!
//! Every `.tab-content` element is a pane and every `.tab-button` a button,
//! in document order. Panes without an `id` are hidden along with the rest but
//! can never be shown. Buttons inside a `.tab-buttons` container form the tab
//! strip, whose first button is the one opened on page load.

use scraper::{ElementRef, Html, Selector};

use crate::pane::PaneKey;
use crate::tabset::TabSet;
use crate::Result;

impl TabSet {
    /// Discover panes and buttons in `markup`.
    ///
    /// A button's target pane comes from its `data-pane` attribute, falling
    /// back to the quoted argument of an `onclick="openDay(event, 'day1')"`
    /// style handler.
    pub fn from_html(markup: &str) -> Result<Self> {
        let doc = Html::parse_document(markup);
        let mut tabs = TabSet::new();

        if let Ok(sel) = Selector::parse(".tab-content") {
            for el in doc.select(&sel) {
                let hidden = has_class(&el, "hidden");
                match el.value().id().filter(|id| !id.trim().is_empty()) {
                    Some(id) => {
                        tabs.insert_pane(PaneKey::new(id)?, el.inner_html(), hidden)?;
                    }
                    None => tabs.insert_unkeyed_pane(el.inner_html(), hidden),
                }
            }
        }

        if let Ok(sel) = Selector::parse(".tab-button") {
            for el in doc.select(&sel) {
                let target = button_target(&el);
                let label = normalize_whitespace(&el.text().collect::<Vec<_>>().join(" "));
                let active = has_class(&el, "active");
                tabs.insert_button(target, label, in_tab_strip(&el), active);
            }
        }

        tracing::debug!(
            page_id = %tabs.page_id(),
            panes = tabs.panes().len(),
            unkeyed_panes = tabs.unkeyed_panes().len(),
            buttons = tabs.buttons().len(),
            "Discovered tabs in markup"
        );

        Ok(tabs)
    }
}

fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn in_tab_strip(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|parent| has_class(&parent, "tab-buttons"))
}

fn button_target(el: &ElementRef<'_>) -> Option<PaneKey> {
    let raw = el
        .value()
        .attr("data-pane")
        .or_else(|| el.value().attr("onclick").and_then(onclick_target))?;

    match PaneKey::new(raw.trim()) {
        Ok(key) => Some(key),
        Err(e) => {
            tracing::warn!(target_key = %raw, error = %e, "Ignoring tab button target");
            None
        }
    }
}

/// Second argument of a `fn(event, 'key')` handler, if it is a string literal.
fn onclick_target(handler: &str) -> Option<&str> {
    let (_, args) = handler.split_once('(')?;
    let (_, rest) = args.split_once(',')?;
    let rest = rest.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &rest[1..];
    let end = body.find(quote)?;
    Some(&body[..end])
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
