//! labtabs tab model
//!
//! Panes and tab buttons owned by a single [`TabSet`]. One pane is visible and
//! one button active at a time once any tab has been activated.

mod error;
mod markup;
mod pane;
mod state;
mod tabset;

pub use error::TabError;
pub use pane::{ButtonId, Pane, PaneKey, TabButton, UnkeyedPane};
pub use state::TabState;
pub use tabset::{ButtonSnapshot, PaneSnapshot, Selection, TabSet, TabSnapshot};

pub type Result<T> = std::result::Result<T, TabError>;
