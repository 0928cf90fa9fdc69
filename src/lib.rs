//! techtips: a self-hosted blog engine for markdown content
//!
//! This crate loads markdown articles, tips, and dashboards with YAML
//! front-matter into an in-memory store and serves rendered pages plus a
//! small JSON API (comments, email notifications) from a single binary.

pub mod commands;
pub mod comments;
pub mod config;
pub mod content;
pub mod helpers;
pub mod notify;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The site context: configuration plus resolved directories
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (articles/, tips/, dashboards/)
    pub content_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site context from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Directory holding the sources for one content kind
    pub fn kind_dir(&self, kind: content::ContentKind) -> std::path::PathBuf {
        self.content_dir.join(kind.dir_name())
    }
}
