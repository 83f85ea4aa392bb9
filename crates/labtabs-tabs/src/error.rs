//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Pane not found: {0}")]
    PaneNotFound(String),

    #[error("Tab button not found: {0}")]
    ButtonNotFound(usize),

    #[error("Invalid pane key: {0:?}")]
    InvalidKey(String),

    #[error("Duplicate pane: {0}")]
    DuplicatePane(String),
}
