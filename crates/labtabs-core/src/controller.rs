//! Tab controller
//!
//! Activation is synchronous: hide every pane, deactivate every button, then
//! show the requested pane and activate the clicked button. In lazy fragment
//! mode it also spawns a load of `<key>.html` whose result lands in the pane
//! only if no later activation of the same pane has happened meanwhile.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;

use labtabs_fragment::{extract_fragment, FragmentSource, HttpFragmentSource};
use labtabs_tabs::{ButtonId, PaneKey, Selection, TabSet, TabSnapshot};

use crate::config::{Config, Placeholders};
use crate::error::CoreError;
use crate::page::ContentMode;
use crate::Result;

/// A click on a tab button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabEvent {
    /// The button the click originated from
    pub button: ButtonId,
}

impl TabEvent {
    pub fn click(button: ButtonId) -> Self {
        Self { button }
    }
}

/// What the controller does with a pane after showing it
#[derive(Clone)]
pub enum ContentStrategy {
    StaticContent,
    LazyFragmentContent(Arc<dyn FragmentSource>),
}

impl ContentStrategy {
    pub fn mode(&self) -> ContentMode {
        match self {
            ContentStrategy::StaticContent => ContentMode::StaticContent,
            ContentStrategy::LazyFragmentContent(_) => ContentMode::LazyFragmentContent,
        }
    }
}

impl std::fmt::Debug for ContentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.mode())
    }
}

/// How a fragment load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fragment markup written into the pane
    Applied,
    /// Document had no matching section; not-found placeholder written
    NotFound,
    /// Request failed; error placeholder written
    Failed,
    /// A newer activation of the pane exists; result discarded
    Superseded,
}

/// Result of [`TabController::activate`]
#[derive(Debug)]
pub struct Activation {
    pub selection: Selection,
    /// Pending fragment load, present in lazy fragment mode
    pub load: Option<JoinHandle<LoadOutcome>>,
}

impl Activation {
    /// Wait for the fragment load, if any.
    pub async fn finished(self) -> Option<LoadOutcome> {
        match self.load {
            Some(handle) => match handle.await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    tracing::warn!(pane = %self.selection.pane, error = %e, "Fragment load task failed");
                    None
                }
            },
            None => None,
        }
    }
}

#[derive(Clone)]
pub struct TabController {
    tabs: Arc<RwLock<TabSet>>,
    /// `None` on pages whose tabs are not managed
    strategy: Option<ContentStrategy>,
    placeholders: Arc<Placeholders>,
}

impl TabController {
    pub fn new(tabs: TabSet, strategy: Option<ContentStrategy>, placeholders: Placeholders) -> Self {
        Self {
            tabs: Arc::new(RwLock::new(tabs)),
            strategy,
            placeholders: Arc::new(placeholders),
        }
    }

    /// Build a controller whose lazy fragments load over HTTP relative to the
    /// configured page URL.
    pub fn from_config(config: &Config, tabs: TabSet) -> Result<Self> {
        config.validate()?;
        let strategy = match config.content_mode()? {
            Some(ContentMode::LazyFragmentContent) => {
                let source = HttpFragmentSource::new(config.page_url()?, &config.http_options())?;
                Some(ContentStrategy::LazyFragmentContent(Arc::new(source)))
            }
            Some(ContentMode::StaticContent) => Some(ContentStrategy::StaticContent),
            None => None,
        };

        tracing::info!(
            page_url = %config.page_url,
            mode = ?strategy.as_ref().map(ContentStrategy::mode),
            "Created tab controller"
        );

        Ok(Self::new(tabs, strategy, config.placeholders.clone()))
    }

    pub fn mode(&self) -> Option<ContentMode> {
        self.strategy.as_ref().map(ContentStrategy::mode)
    }

    pub fn with_tabs<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TabSet) -> T,
    {
        f(&self.tabs.read())
    }

    pub fn snapshot(&self) -> TabSnapshot {
        self.tabs.read().snapshot()
    }

    /// Show pane `key` and mark the event's button active.
    ///
    /// On return exactly one pane is visible and one button active. In lazy
    /// fragment mode the pane's content is loaded in the background.
    pub fn activate(&self, event: TabEvent, key: &PaneKey) -> Result<Activation> {
        let runtime = match &self.strategy {
            Some(ContentStrategy::LazyFragmentContent(source)) => {
                let handle =
                    tokio::runtime::Handle::try_current().map_err(|_| CoreError::NoRuntime)?;
                Some((handle, Arc::clone(source)))
            }
            _ => None,
        };

        let (selection, page_id) = {
            let mut tabs = self.tabs.write();
            let selection = tabs.activate(event.button, key)?;
            (selection, tabs.page_id().to_string())
        };

        tracing::info!(
            page_id = %page_id,
            pane = %selection.pane,
            button = %selection.button,
            generation = selection.generation,
            "Activated tab"
        );

        let load = runtime.map(|(handle, source)| {
            handle.spawn(load_fragment(
                Arc::clone(&self.tabs),
                source,
                Arc::clone(&self.placeholders),
                selection.pane.clone(),
                selection.generation,
            ))
        });

        Ok(Activation { selection, load })
    }

    /// Click the first tab button, once the page model is ready.
    ///
    /// Does nothing on unmanaged pages, when there are no buttons, or when the
    /// first button does not name a pane.
    pub fn auto_activate_first(&self) -> Result<Option<Activation>> {
        if self.strategy.is_none() {
            return Ok(None);
        }

        let first = self
            .tabs
            .read()
            .first_button()
            .map(|b| (b.id, b.target.clone()));

        match first {
            Some((id, Some(target))) => self.activate(TabEvent::click(id), &target).map(Some),
            Some((id, None)) => {
                tracing::debug!(button = %id, "First tab button names no pane");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

async fn load_fragment(
    tabs: Arc<RwLock<TabSet>>,
    source: Arc<dyn FragmentSource>,
    placeholders: Arc<Placeholders>,
    key: PaneKey,
    generation: u64,
) -> LoadOutcome {
    let fetched = source
        .fetch_document(key.as_str())
        .await
        .and_then(|document| extract_fragment(&document, key.as_str()));

    let (html, outcome) = match fetched {
        Ok(html) => (html, LoadOutcome::Applied),
        Err(e) if e.is_not_found() => {
            tracing::warn!(pane = %key, "Content not found in the fetched document");
            (placeholders.not_found.clone(), LoadOutcome::NotFound)
        }
        Err(e) => {
            tracing::warn!(pane = %key, error = %e, "Error loading pane content");
            (placeholders.load_error.clone(), LoadOutcome::Failed)
        }
    };

    let applied = tabs.write().apply_content(&key, generation, html);
    match applied {
        Ok(true) => outcome,
        Ok(false) => {
            tracing::debug!(pane = %key, generation, "Discarding superseded fragment load");
            LoadOutcome::Superseded
        }
        Err(e) => {
            tracing::warn!(pane = %key, error = %e, "Pane disappeared before its fragment loaded");
            LoadOutcome::Failed
        }
    }
}
