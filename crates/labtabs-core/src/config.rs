//! Controller configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use labtabs_fragment::HttpOptions;

use crate::error::CoreError;
use crate::page::{ContentMode, PageKind};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the page hosting the tabs; fragment documents resolve against it
    pub page_url: String,
    /// Explicit content mode; detected from the page path when unset
    pub content_mode: Option<ContentMode>,
    /// Per-request timeout for fragment documents
    pub fetch_timeout_secs: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    pub placeholders: Placeholders,
}

/// Markup written into a pane when its fragment cannot be shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    /// The document loaded but has no section for the pane
    pub not_found: String,
    /// The request failed or returned a non-success status
    pub load_error: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            not_found: "<p>Content not found in the fetched file.</p>".to_string(),
            load_error: "<p>Error loading content.</p>".to_string(),
        }
    }
}

impl Config {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), page_url = %config.page_url, "Loaded config");
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.page_url()?;
        if self.fetch_timeout_secs == 0 {
            return Err(CoreError::Config(
                "fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn page_url(&self) -> Result<Url> {
        Url::parse(&self.page_url)
            .map_err(|e| CoreError::Config(format!("invalid page_url {:?}: {}", self.page_url, e)))
    }

    /// The explicit mode if set, otherwise the mode of the detected page kind.
    pub fn content_mode(&self) -> Result<Option<ContentMode>> {
        if let Some(mode) = self.content_mode {
            return Ok(Some(mode));
        }
        let url = self.page_url()?;
        Ok(PageKind::detect(url.path()).content_mode())
    }

    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let http = HttpOptions::default();
        Self {
            page_url: "http://localhost/labs.html".to_string(),
            content_mode: None,
            fetch_timeout_secs: http.timeout.as_secs(),
            max_redirects: http.max_redirects,
            user_agent: http.user_agent,
            placeholders: Placeholders::default(),
        }
    }
}
