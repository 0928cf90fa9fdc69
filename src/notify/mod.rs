//! Email notifications
//!
//! Subscription and comment events are forwarded to the site owner through
//! an HTTP email-delivery API (Resend-compatible wire shape: POST `{from,
//! to, subject, html}` with a bearer key). One attempt per event, no retry
//! and no queue; an upstream failure is the caller's failure.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::config::NotifyConfig;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Check a subscriber address against the same simple shape the subscribe
/// form enforces
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Outbound payload for the email-delivery API
#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Data for a comment notification email
#[derive(Debug, Clone)]
pub struct CommentNotification {
    pub author_name: String,
    pub reaction: String,
    pub comment: String,
    pub content_title: String,
    pub content_type: String,
    pub content_slug: String,
}

/// Sends owner notifications through the configured email API
#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
    to: String,
}

impl Mailer {
    /// Build a mailer from site config, reading the API key from the
    /// environment variable the config names.
    ///
    /// Returns `None` (with a logged warning) when the key or the owner
    /// address is missing; the notification endpoints then answer 503
    /// instead of silently dropping events.
    pub fn from_config(config: &NotifyConfig) -> Option<Self> {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!(
                    "email notifications disabled: {} is not set",
                    config.api_key_env
                );
                return None;
            }
        };

        if config.to.trim().is_empty() {
            tracing::warn!("email notifications disabled: notify.to is not configured");
            return None;
        }

        tracing::info!("email notifications enabled via {}", config.api_url);
        Some(Self::with_endpoint(
            &config.api_url,
            &api_key,
            &config.from,
            &config.to,
        ))
    }

    /// Build a mailer against an explicit endpoint (tests, tooling)
    pub fn with_endpoint(api_url: &str, api_key: &str, from: &str, to: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// One email, one attempt
    async fn send(&self, subject: &str, html: &str) -> Result<()> {
        let payload = EmailPayload {
            from: &self.from,
            to: [self.to.as_str()],
            subject,
            html,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("email API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("email API error ({}): {}", status, body));
        }

        tracing::debug!("notification sent: {}", subject);
        Ok(())
    }

    /// Tell the owner about a new newsletter subscriber
    pub async fn send_subscription_notification(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<()> {
        let name_row = name
            .filter(|n| !n.trim().is_empty())
            .map(|n| {
                format!(
                    r#"<p style="margin: 10px 0 0;"><strong>Name:</strong> {}</p>"#,
                    html_escape(n)
                )
            })
            .unwrap_or_default();

        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h1>New Newsletter Subscription</h1>
  <p>Someone just subscribed to your newsletter!</p>
  <div style="background: #f5f5f5; padding: 20px; border-radius: 8px;">
    <p style="margin: 0;"><strong>Email:</strong> {}</p>
    {}
  </div>
  <p style="color: #666; font-size: 14px;">Subscribed at: {}</p>
</div>"#,
            html_escape(email),
            name_row,
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        );

        self.send("🎉 New Newsletter Subscriber!", &html).await
    }

    /// Tell the owner about a new comment
    pub async fn send_comment_notification(&self, n: &CommentNotification) -> Result<()> {
        let subject = format!("💬 New Comment on \"{}\"", n.content_title);
        let html = format!(
            r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h1>New Comment Received!</h1>
  <p>Someone just commented on your {}:</p>
  <div style="background: #f5f5f5; padding: 20px; border-radius: 8px;">
    <p style="margin: 0;"><strong>Content:</strong> {} ({})</p>
    <p style="margin: 10px 0 0;"><strong>Author:</strong> {}</p>
    <p style="margin: 10px 0 0;"><strong>Reaction:</strong> {}</p>
    <p style="margin: 10px 0 0;"><strong>Comment:</strong></p>
    <div style="background: white; padding: 15px; border-radius: 6px; margin-top: 10px;">{}</div>
  </div>
  <p style="color: #666; font-size: 14px;">Commented at: {}</p>
</div>"#,
            html_escape(&n.content_type),
            html_escape(&n.content_title),
            html_escape(&n.content_slug),
            html_escape(&n.author_name),
            html_escape(&n.reaction),
            html_escape(&n.comment).replace('\n', "<br>"),
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        );

        self.send(&subject, &html).await
    }
}

/// Comment and subscriber fields are user input; escape them before they
/// land in owner-facing HTML
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.io"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn test_subscription_notification_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "from": "TechTips <onboarding@resend.dev>",
                "to": ["owner@example.com"],
                "subject": "🎉 New Newsletter Subscriber!"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "1"})))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = Mailer::with_endpoint(
            &format!("{}/emails", server.uri()),
            "test-key",
            "TechTips <onboarding@resend.dev>",
            "owner@example.com",
        );
        mailer
            .send_subscription_notification("reader@example.com", Some("Reader"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string(r#"{"message":"bad address"}"#),
            )
            .mount(&server)
            .await;

        let mailer = Mailer::with_endpoint(&server.uri(), "k", "f <f@x.io>", "t@x.io");
        let err = mailer
            .send_subscription_notification("reader@example.com", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("email API error"));
    }

    #[tokio::test]
    async fn test_comment_notification_escapes_input() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = Mailer::with_endpoint(&server.uri(), "k", "f <f@x.io>", "t@x.io");
        mailer
            .send_comment_notification(&CommentNotification {
                author_name: "<script>alert(1)</script>".to_string(),
                reaction: "🔥".to_string(),
                comment: "line one\nline two".to_string(),
                content_title: "Post".to_string(),
                content_type: "article".to_string(),
                content_slug: "post".to_string(),
            })
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body).to_string();
        assert!(body.contains("&lt;script&gt;"));
        assert!(body.contains("line one<br>line two"));
    }
}
