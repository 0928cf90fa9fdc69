//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    /// Optional directory served at /images (post illustrations)
    pub images_dir: Option<String>,

    // Display
    /// Moment.js-style display format for content dates
    pub date_format: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Email notifications (subscribe / comment)
    #[serde(default)]
    pub notify: NotifyConfig,

    // Comment persistence
    #[serde(default)]
    pub comments: CommentsConfig,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "TechTips".to_string(),
            subtitle: String::new(),
            description: "Technical articles, quick tips, and dashboards".to_string(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),

            content_dir: "content".to_string(),
            images_dir: None,

            date_format: "MMMM DD, YYYY".to_string(),
            highlight: HighlightConfig::default(),

            server: ServerConfig::default(),
            notify: NotifyConfig::default(),
            comments: CommentsConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

/// Email notification configuration
///
/// The API key itself never lives in the config file; `api_key_env` names
/// the environment variable to read it from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Email delivery API endpoint (Resend-compatible)
    pub api_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Sender, e.g. "TechTips <onboarding@resend.dev>"
    pub from: String,
    /// Site-owner address notifications are delivered to
    pub to: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.resend.com/emails".to_string(),
            api_key_env: "RESEND_API_KEY".to_string(),
            from: "TechTips <onboarding@resend.dev>".to_string(),
            to: String::new(),
        }
    }
}

/// Comment persistence configuration
///
/// When `api_url` is unset comments are kept in process memory only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Hosted record-store endpoint for comment rows
    pub api_url: Option<String>,
    /// Environment variable holding the store API key
    pub api_key_env: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.notify.api_key_env, "RESEND_API_KEY");
        assert!(config.comments.api_url.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let yaml = r#"
title: My Tech Blog
url: https://blog.example.com
server:
  port: 8080
notify:
  to: owner@example.com
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Tech Blog");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert_eq!(config.notify.to, "owner@example.com");
        assert_eq!(config.notify.api_url, "https://api.resend.com/emails");
        assert_eq!(config.date_format, "MMMM DD, YYYY");
    }

    #[test]
    fn test_extra_fields_preserved() {
        let yaml = "title: X\nfooter_note: hello\n";
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("footer_note"));
    }
}
