//! Fragment extraction

use scraper::{Html, Selector};

use crate::error::FragmentError;
use crate::Result;

/// Inner markup of the first element in `document` whose `id` equals `key`.
///
/// Ids are compared literally rather than through a `#key` selector, so keys
/// that are not valid CSS identifiers still match. The markup is returned
/// verbatim.
pub fn extract_fragment(document: &str, key: &str) -> Result<String> {
    let doc = Html::parse_document(document);
    let with_id =
        Selector::parse("[id]").map_err(|_| FragmentError::NotFound(key.to_string()))?;

    doc.select(&with_id)
        .find(|el| el.value().id() == Some(key))
        .map(|el| el.inner_html())
        .ok_or_else(|| FragmentError::NotFound(key.to_string()))
}
