//! Table-of-contents extraction
//!
//! The TOC is built from the raw markdown, not the rendered HTML, so the id
//! derived here must be byte-identical to the id the markdown renderer
//! assigns to the same heading or in-page anchors break.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// h2/h3 lines only; h1 is the page title, h4+ is too deep for a sidebar
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^(#{2,3})\s+(.+)$").unwrap();
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// One table-of-contents entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    pub id: String,
    pub text: String,
    pub level: usize,
}

/// Derive a URL-fragment id from heading text: lowercase, runs of
/// non-alphanumeric characters collapsed to a single hyphen, leading and
/// trailing hyphens trimmed.
pub fn heading_id(text: &str) -> String {
    let lower = text.to_lowercase();
    let id = NON_ALNUM_RE.replace_all(&lower, "-");
    id.trim_matches('-').to_string()
}

/// Extract h2/h3 headings from raw markdown in document order
pub fn extract(markdown: &str) -> Vec<TocItem> {
    HEADING_RE
        .captures_iter(markdown)
        .map(|cap| {
            let level = cap[1].len();
            let text = cap[2].trim().to_string();
            TocItem {
                id: heading_id(&text),
                text,
                level,
            }
        })
        .collect()
}
