//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::{ContentKind, ContentStore};
use crate::Site;

/// List site content by kind, or tag usage counts
pub fn run(site: &Site, what: &str) -> Result<()> {
    let store = ContentStore::load(site)?;

    match what {
        "article" | "articles" | "tip" | "tips" | "dashboard" | "dashboards" => {
            let kind = ContentKind::parse(what)
                .ok_or_else(|| anyhow::anyhow!("unreachable kind: {}", what))?;
            let items = store.get_by_kind(kind);
            println!("{} ({}):", kind.label(), items.len());
            for item in items {
                println!(
                    "  {} - {} [{}]",
                    item.date.format("%Y-%m-%d"),
                    item.title,
                    item.slug
                );
            }
        }
        "tag" | "tags" => {
            let mut tags: HashMap<String, usize> = HashMap::new();
            for item in store.all() {
                for tag in &item.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: article, tip, dashboard, tag",
                what
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_unknown_type_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let site = Site {
            config: SiteConfig::default(),
            base_dir: tmp.path().to_path_buf(),
            content_dir: tmp.path().join("content"),
        };
        assert!(run(&site, "widget").is_err());
        assert!(run(&site, "articles").is_ok());
    }
}
