//! In-memory content store
//!
//! The three collections are materialized once at startup and never
//! invalidated; picking up content changes takes a restart. The store is
//! the explicit owner of what would otherwise be lazily-initialized module
//! globals, and is shared behind the server state.

use anyhow::Result;
use std::collections::BTreeSet;

use super::loader::ContentLoader;
use super::{ContentItem, ContentKind};
use crate::Site;

/// How many related items a detail page shows
const RELATED_LIMIT: usize = 3;

/// Read-only queries over the loaded content collections
pub struct ContentStore {
    articles: Vec<ContentItem>,
    tips: Vec<ContentItem>,
    dashboards: Vec<ContentItem>,
}

impl ContentStore {
    /// Load every collection from the site's content directory
    pub fn load(site: &Site) -> Result<Self> {
        let loader = ContentLoader::new(site);
        let articles = loader.load_kind(ContentKind::Article)?;
        let tips = loader.load_kind(ContentKind::Tip)?;
        let dashboards = loader.load_kind(ContentKind::Dashboard)?;

        tracing::info!(
            "Loaded {} articles, {} tips, {} dashboards",
            articles.len(),
            tips.len(),
            dashboards.len()
        );

        Ok(Self {
            articles,
            tips,
            dashboards,
        })
    }

    /// Build a store from already-materialized items (tests, tooling)
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        let mut store = Self {
            articles: Vec::new(),
            tips: Vec::new(),
            dashboards: Vec::new(),
        };
        for item in items {
            match item.kind {
                ContentKind::Article => store.articles.push(item),
                ContentKind::Tip => store.tips.push(item),
                ContentKind::Dashboard => store.dashboards.push(item),
            }
        }
        for kind in ContentKind::ALL {
            store.collection_mut(kind).sort_by(|a, b| b.date.cmp(&a.date));
        }
        store
    }

    fn collection_mut(&mut self, kind: ContentKind) -> &mut Vec<ContentItem> {
        match kind {
            ContentKind::Article => &mut self.articles,
            ContentKind::Tip => &mut self.tips,
            ContentKind::Dashboard => &mut self.dashboards,
        }
    }

    /// Full sorted collection for one kind
    pub fn get_by_kind(&self, kind: ContentKind) -> &[ContentItem] {
        match kind {
            ContentKind::Article => &self.articles,
            ContentKind::Tip => &self.tips,
            ContentKind::Dashboard => &self.dashboards,
        }
    }

    /// Exact slug match within a kind, or across all kinds in priority
    /// order (article, tip, dashboard) when no kind is given
    pub fn get_by_slug(&self, slug: &str, kind: Option<ContentKind>) -> Option<&ContentItem> {
        match kind {
            Some(kind) => self.get_by_kind(kind).iter().find(|i| i.slug == slug),
            None => ContentKind::ALL
                .iter()
                .find_map(|&k| self.get_by_kind(k).iter().find(|i| i.slug == slug)),
        }
    }

    /// Distinct first-tags across a kind's collection, alphabetical
    pub fn primary_tags(&self, kind: ContentKind) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .get_by_kind(kind)
            .iter()
            .filter_map(|i| i.primary_tag())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Items whose first tag equals `tag` (case-sensitive), in collection
    /// order
    pub fn get_by_primary_tag(&self, kind: ContentKind, tag: &str) -> Vec<&ContentItem> {
        self.get_by_kind(kind)
            .iter()
            .filter(|i| i.primary_tag() == Some(tag))
            .collect()
    }

    /// Distinct tags across the full tag sets of a kind, alphabetical
    pub fn tags(&self, kind: ContentKind) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .get_by_kind(kind)
            .iter()
            .flat_map(|i| i.tags.iter().map(String::as_str))
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Case-insensitive substring search over title and summary.
    ///
    /// A blank query is a no-op filter: the full collection comes back in
    /// order, not an empty set.
    pub fn search(&self, kind: ContentKind, query: &str) -> Vec<&ContentItem> {
        let query = query.trim().to_lowercase();
        self.get_by_kind(kind)
            .iter()
            .filter(|i| {
                query.is_empty()
                    || i.title.to_lowercase().contains(&query)
                    || i.summary.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// All kinds merged, date descending (home page, feed)
    pub fn all(&self) -> Vec<&ContentItem> {
        let mut all: Vec<&ContentItem> = self
            .articles
            .iter()
            .chain(self.tips.iter())
            .chain(self.dashboards.iter())
            .collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        all
    }

    /// Same kind and same primary tag, excluding the item itself, capped
    pub fn related(&self, item: &ContentItem) -> Vec<&ContentItem> {
        let Some(primary) = item.primary_tag() else {
            return Vec::new();
        };
        self.get_by_kind(item.kind)
            .iter()
            .filter(|i| i.slug != item.slug && i.primary_tag() == Some(primary))
            .take(RELATED_LIMIT)
            .collect()
    }

    /// Total item count across all kinds
    pub fn len(&self) -> usize {
        self.articles.len() + self.tips.len() + self.dashboards.len()
    }

    /// Whether no content was loaded at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
