//! Comment persistence
//!
//! Comments are the only user-written data in the system. They live in an
//! external record store keyed by `(content_slug, content_type)`; all this
//! crate needs is insert-and-list-descending semantics, expressed as the
//! [`CommentStore`] trait. The in-memory backend keeps a site fully
//! functional (and testable) without any hosted store configured.

mod http;
mod memory;

pub use http::HttpCommentStore;
pub use memory::MemoryCommentStore;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::ContentKind;

/// A stored comment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    pub reaction: String,
    pub comment: String,
    pub content_slug: String,
    pub content_type: ContentKind,
    pub created_at: DateTime<Utc>,
}

/// A comment about to be stored; the store stamps `created_at`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub author_name: String,
    #[serde(default)]
    pub author_email: Option<String>,
    pub reaction: String,
    pub comment: String,
    pub content_slug: String,
    pub content_type: ContentKind,
}

impl NewComment {
    /// Turn the input into a record stamped with the current time
    pub fn into_comment(self) -> Comment {
        Comment {
            author_name: self.author_name,
            author_email: self.author_email,
            reaction: self.reaction,
            comment: self.comment,
            content_slug: self.content_slug,
            content_type: self.content_type,
            created_at: Utc::now(),
        }
    }
}

/// Insert-and-list comment persistence
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Store one comment and return the stamped record
    async fn insert(&self, new: NewComment) -> Result<Comment>;

    /// All comments for one content item, newest first
    async fn list(&self, kind: ContentKind, slug: &str) -> Result<Vec<Comment>>;
}

/// Sort newest-first regardless of what order a backend returned
pub(crate) fn sort_descending(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
