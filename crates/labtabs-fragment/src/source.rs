//! Fragment document sources

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

use crate::error::FragmentError;
use crate::Result;

/// File name of the document holding `key`'s fragment.
pub fn fragment_file_name(key: &str) -> String {
    format!("{}.html", key)
}

/// Where fragment documents come from.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Fetch the document holding `key`'s fragment and return its body.
    async fn fetch_document(&self, key: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(12),
            max_redirects: 5,
            user_agent: concat!("labtabs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Loads `<key>.html` relative to the page URL over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    client: reqwest::Client,
    page_url: Url,
}

impl HttpFragmentSource {
    pub fn new(page_url: Url, options: &HttpOptions) -> Result<Self> {
        if page_url.scheme() != "http" && page_url.scheme() != "https" {
            return Err(FragmentError::InvalidUrl(format!(
                "fragments load only over http(s), got {}",
                page_url
            )));
        }

        let client = reqwest::Client::builder()
            .redirect(Policy::limited(options.max_redirects))
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(|e| FragmentError::Client(e.to_string()))?;

        Ok(Self { client, page_url })
    }

    /// URL of `key`'s document, resolved against the page URL.
    ///
    /// Keys that would escape the page's directory are rejected.
    pub fn document_url(&self, key: &str) -> Result<Url> {
        if key.contains(['/', '\\', '?', '#', ':']) || key.starts_with('.') {
            return Err(FragmentError::InvalidUrl(format!(
                "pane key {:?} is not a plain file name",
                key
            )));
        }
        Ok(self.page_url.join(&fragment_file_name(key))?)
    }
}

#[async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch_document(&self, key: &str) -> Result<String> {
        let url = self.document_url(key)?;
        tracing::debug!(pane = %key, url = %url, "Fetching fragment document");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        tracing::debug!(pane = %key, status = status.as_u16(), "Fragment response");

        if !status.is_success() {
            return Err(FragmentError::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}
