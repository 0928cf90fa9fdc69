//! Content loader - materializes content collections from markdown sources

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{reading_time, ContentItem, ContentKind, FrontMatter};
use crate::Site;

/// Loads content items from the site's content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load all items of one kind, sorted by date descending.
    ///
    /// A file that cannot be read or whose front-matter is malformed is
    /// logged and skipped; one bad source never fails the collection.
    /// Returns an empty collection when the directory does not exist.
    pub fn load_kind(&self, kind: ContentKind) -> Result<Vec<ContentItem>> {
        let dir = self.site.kind_dir(kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(&dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_item(path, kind) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::warn!("Failed to load {} {:?}: {:#}", kind, path, e);
                    }
                }
            }
        }

        // Date descending; the sort is stable so equal dates keep
        // discovery (file name) order
        items.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(items)
    }

    /// Load a single item from a file
    fn load_item(&self, path: &Path, kind: ContentKind) -> Result<ContentItem> {
        let raw = fs::read_to_string(path).context("read source file")?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let title = fm.title.clone().unwrap_or_else(|| "Untitled".to_string());
        let summary = fm.summary.clone().unwrap_or_default();
        let date = fm
            .parse_date()
            .unwrap_or_else(|| Local::now().date_naive());
        let reading_time = fm.reading_time.unwrap_or_else(|| reading_time(body));

        Ok(ContentItem {
            slug,
            title,
            summary,
            date,
            tags: fm.tags,
            reading_time,
            content: body.to_string(),
            kind,
            embed_url: fm.embed_url,
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
