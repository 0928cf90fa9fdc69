//! Content models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three content collections, each with its own routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Tip,
    Dashboard,
}

impl ContentKind {
    /// All kinds in lookup-priority order (used when a slug lookup does not
    /// name a kind)
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Article,
        ContentKind::Tip,
        ContentKind::Dashboard,
    ];

    /// Source directory name under the content dir
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Article => "articles",
            ContentKind::Tip => "tips",
            ContentKind::Dashboard => "dashboards",
        }
    }

    /// URL path prefix for this kind's pages
    pub fn route_prefix(self) -> &'static str {
        match self {
            ContentKind::Article => "/articles",
            ContentKind::Tip => "/tips",
            ContentKind::Dashboard => "/dashboards",
        }
    }

    /// Singular name used on the wire (`contentType` payload field)
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Tip => "tip",
            ContentKind::Dashboard => "dashboard",
        }
    }

    /// Display label for listing pages
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Article => "Articles",
            ContentKind::Tip => "Tips",
            ContentKind::Dashboard => "Dashboards",
        }
    }

    /// Parse a kind from its singular or plural form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "article" | "articles" => Some(ContentKind::Article),
            "tip" | "tips" => Some(ContentKind::Tip),
            "dashboard" | "dashboards" => Some(ContentKind::Dashboard),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of content: an article, a tip, or an embedded dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// URL key, derived from the source file name; unique within a kind
    pub slug: String,

    /// Display title
    pub title: String,

    /// Short display summary
    pub summary: String,

    /// Publication date (sort key, descending)
    pub date: NaiveDate,

    /// Ordered tags; the first tag is the primary tag
    pub tags: Vec<String>,

    /// Reading time in minutes (front-matter override or word-count derived)
    pub reading_time: u32,

    /// Raw markdown body, rendered on demand
    pub content: String,

    /// Which collection this item belongs to
    pub kind: ContentKind,

    /// Embed target for dashboard items
    pub embed_url: Option<String>,
}

impl ContentItem {
    /// URL path of this item's detail page
    pub fn url(&self) -> String {
        format!("{}/{}", self.kind.route_prefix(), self.slug)
    }

    /// The first tag, used for coarse category filtering
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

/// Reading time in minutes at a fixed 200 words per minute, rounded up.
///
/// An empty body still counts as one token so the shortest possible item
/// reads as "1 min read".
pub fn reading_time(body: &str) -> u32 {
    let words = body.split_whitespace().count().max(1);
    words.div_ceil(200) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time_rounds_up() {
        let body_400 = "word ".repeat(400);
        let body_401 = "word ".repeat(401);
        assert_eq!(reading_time(&body_400), 2);
        assert_eq!(reading_time(&body_401), 3);
    }

    #[test]
    fn test_reading_time_short_bodies() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("   \n  "), 1);
        assert_eq!(reading_time("just a few words"), 1);
        assert_eq!(reading_time(&"w ".repeat(200)), 1);
        assert_eq!(reading_time(&"w ".repeat(201)), 2);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ContentKind::parse("article"), Some(ContentKind::Article));
        assert_eq!(ContentKind::parse("tips"), Some(ContentKind::Tip));
        assert_eq!(ContentKind::parse("widget"), None);
    }

    #[test]
    fn test_item_url() {
        let item = ContentItem {
            slug: "intro-to-caching".to_string(),
            title: "Intro".to_string(),
            summary: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            tags: vec![],
            reading_time: 1,
            content: String::new(),
            kind: ContentKind::Tip,
            embed_url: None,
        };
        assert_eq!(item.url(), "/tips/intro-to-caching");
    }
}
