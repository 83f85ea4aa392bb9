//! Fragment error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Fragment not found: {0}")]
    NotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl FragmentError {
    /// The document loaded but held no matching section
    pub fn is_not_found(&self) -> bool {
        matches!(self, FragmentError::NotFound(_))
    }
}

impl From<reqwest::Error> for FragmentError {
    fn from(e: reqwest::Error) -> Self {
        FragmentError::Network(e.to_string())
    }
}

impl From<url::ParseError> for FragmentError {
    fn from(e: url::ParseError) -> Self {
        FragmentError::InvalidUrl(e.to_string())
    }
}
