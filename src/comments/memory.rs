//! In-process comment storage

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use super::{sort_descending, Comment, CommentStore, NewComment};
use crate::content::ContentKind;

/// Comment storage that lives for the process lifetime only.
///
/// Used when no hosted record store is configured, and in tests.
#[derive(Default)]
pub struct MemoryCommentStore {
    records: Mutex<Vec<Comment>>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn insert(&self, new: NewComment) -> Result<Comment> {
        let comment = new.into_comment();
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("comment store lock poisoned"))?;
        records.push(comment.clone());
        Ok(comment)
    }

    async fn list(&self, kind: ContentKind, slug: &str) -> Result<Vec<Comment>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("comment store lock poisoned"))?;
        let mut matching: Vec<Comment> = records
            .iter()
            .filter(|c| c.content_type == kind && c.content_slug == slug)
            .cloned()
            .collect();
        drop(records);
        sort_descending(&mut matching);
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn new_comment(slug: &str, text: &str) -> NewComment {
        NewComment {
            author_name: "Ada".to_string(),
            author_email: None,
            reaction: "💡".to_string(),
            comment: text.to_string(),
            content_slug: slug.to_string(),
            content_type: ContentKind::Article,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MemoryCommentStore::new();
        store.insert(new_comment("a", "first")).await.unwrap();
        store.insert(new_comment("a", "second")).await.unwrap();
        store.insert(new_comment("b", "other page")).await.unwrap();

        let listed = store.list(ContentKind::Article, "a").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|c| c.content_slug == "a"));
    }

    #[tokio::test]
    async fn test_list_is_keyed_by_kind_and_slug() {
        let store = MemoryCommentStore::new();
        store.insert(new_comment("a", "article comment")).await.unwrap();

        assert!(store.list(ContentKind::Tip, "a").await.unwrap().is_empty());
        assert!(store
            .list(ContentKind::Article, "missing")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryCommentStore::new();
        // Insert out of order directly to exercise the sort
        let old = Comment {
            created_at: Utc::now() - Duration::hours(2),
            ..new_comment("a", "old").into_comment()
        };
        let new = Comment {
            created_at: Utc::now(),
            ..new_comment("a", "new").into_comment()
        };
        store.records.lock().unwrap().extend([old, new.clone()]);

        let listed = store.list(ContentKind::Article, "a").await.unwrap();
        assert_eq!(listed[0].comment, "new");
        assert_eq!(listed[1].comment, "old");
    }
}
