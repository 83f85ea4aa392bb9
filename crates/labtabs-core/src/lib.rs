//! labtabs core
//!
//! Tab controller for course pages: one pane visible at a time, with pane
//! content optionally loaded from `<key>.html` fragment documents.

mod config;
mod controller;
mod error;
mod page;

pub use config::{Config, Placeholders};
pub use controller::{Activation, ContentStrategy, LoadOutcome, TabController, TabEvent};
pub use error::CoreError;
pub use page::{ContentMode, PageKind};

// Re-export the building blocks hosts need
pub use labtabs_fragment::{
    extract_fragment, fragment_file_name, FragmentError, FragmentSource, HttpFragmentSource,
    HttpOptions,
};
pub use labtabs_tabs::{ButtonId, PaneKey, Selection, TabError, TabSet, TabSnapshot, TabState};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
