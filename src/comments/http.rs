//! Hosted comment storage
//!
//! Forwards records to an external REST record store. The store is treated
//! as a dumb collection endpoint: POST one JSON record, GET the records for
//! one `(contentSlug, contentType)` key. Ordering is enforced on our side.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;

use super::{sort_descending, Comment, CommentStore, NewComment};
use crate::content::ContentKind;

/// Comment storage backed by a hosted record store
pub struct HttpCommentStore {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpCommentStore {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }
}

#[async_trait]
impl CommentStore for HttpCommentStore {
    async fn insert(&self, new: NewComment) -> Result<Comment> {
        let comment = new.into_comment();

        let response = self
            .authorize(self.http.post(&self.api_url))
            .json(&comment)
            .send()
            .await
            .context("comment store request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("comment store rejected insert ({}): {}", status, body));
        }

        Ok(comment)
    }

    async fn list(&self, kind: ContentKind, slug: &str) -> Result<Vec<Comment>> {
        let response = self
            .authorize(self.http.get(&self.api_url))
            .query(&[("contentSlug", slug), ("contentType", kind.as_str())])
            .send()
            .await
            .context("comment store request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("comment store list failed ({})", response.status()));
        }

        let mut comments: Vec<Comment> = response
            .json()
            .await
            .context("comment store returned invalid records")?;
        sort_descending(&mut comments);
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_insert_posts_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let store = HttpCommentStore::new(format!("{}/comments", server.uri()), None);
        let stored = store
            .insert(NewComment {
                author_name: "Ada".to_string(),
                author_email: None,
                reaction: "👍".to_string(),
                comment: "Nice write-up".to_string(),
                content_slug: "rust-intro".to_string(),
                content_type: ContentKind::Article,
            })
            .await
            .unwrap();

        assert_eq!(stored.author_name, "Ada");
    }

    #[tokio::test]
    async fn test_insert_surfaces_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let store = HttpCommentStore::new(server.uri(), None);
        let err = store
            .insert(NewComment {
                author_name: "Ada".to_string(),
                author_email: None,
                reaction: "👍".to_string(),
                comment: "text".to_string(),
                content_slug: "s".to_string(),
                content_type: ContentKind::Tip,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("rejected insert"));
    }

    #[tokio::test]
    async fn test_list_sorts_descending() {
        let server = MockServer::start().await;
        let records = json!([
            {
                "authorName": "A",
                "reaction": "👍",
                "comment": "older",
                "contentSlug": "s",
                "contentType": "article",
                "createdAt": "2024-01-01T10:00:00Z"
            },
            {
                "authorName": "B",
                "reaction": "🔥",
                "comment": "newer",
                "contentSlug": "s",
                "contentType": "article",
                "createdAt": "2024-02-01T10:00:00Z"
            }
        ]);
        Mock::given(method("GET"))
            .and(query_param("contentSlug", "s"))
            .and(query_param("contentType", "article"))
            .respond_with(ResponseTemplate::new(200).set_body_json(records))
            .mount(&server)
            .await;

        let store = HttpCommentStore::new(server.uri(), None);
        let listed = store.list(ContentKind::Article, "s").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].comment, "newer");
        assert_eq!(listed[1].comment, "older");
    }
}
