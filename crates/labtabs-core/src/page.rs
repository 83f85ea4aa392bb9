//! Page kinds and their content modes

use serde::{Deserialize, Serialize};

/// How a page fills its panes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Pane content is already in the page
    StaticContent,
    /// Pane content is fetched from `<key>.html` on every activation
    LazyFragmentContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Labs,
    ProgramSchedule,
    Other,
}

impl PageKind {
    /// Classify a page by its path.
    pub fn detect(path: &str) -> Self {
        if path.contains("labs.html") {
            PageKind::Labs
        } else if path.contains("program-schedule.html") {
            PageKind::ProgramSchedule
        } else {
            PageKind::Other
        }
    }

    /// `None` for pages whose tabs are not managed.
    pub fn content_mode(&self) -> Option<ContentMode> {
        match self {
            PageKind::Labs => Some(ContentMode::LazyFragmentContent),
            PageKind::ProgramSchedule => Some(ContentMode::StaticContent),
            PageKind::Other => None,
        }
    }
}
