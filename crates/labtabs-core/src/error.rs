//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] labtabs_tabs::TabError),

    #[error("Fragment error: {0}")]
    Fragment(#[from] labtabs_fragment::FragmentError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lazy fragment loading needs a running tokio runtime")]
    NoRuntime,
}
