//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::ContentKind;

const DEFAULT_CONFIG: &str = r#"# techtips configuration

# Site
title: TechTips
subtitle: ''
description: Technical articles, quick tips, and dashboards
author: John Doe
language: en

# URL
url: http://localhost:4000

# Directory
content_dir: content
# images_dir: images

# Display
date_format: MMMM DD, YYYY
highlight:
  theme: base16-ocean.dark
  line_number: false

# Server
server:
  ip: localhost
  port: 4000

# Email notifications (subscribe / comment).
# The API key is read from the environment variable named below.
notify:
  api_url: https://api.resend.com/emails
  api_key_env: RESEND_API_KEY
  from: TechTips <onboarding@resend.dev>
  to: ''

# Comment persistence. Without api_url comments live in process memory.
# comments:
#   api_url: https://records.example.com/comments
#   api_key_env: COMMENTS_API_KEY
"#;

const SAMPLE_ARTICLE: &str = r#"---
title: Hello World
date: 2024-01-15
summary: A first article to show the front-matter format.
tags:
  - Meta
---

## Getting Started!

Write articles as markdown files in `content/articles/`. The file name
becomes the slug, so this file is served at `/articles/hello-world`.

## Front-matter

Set `title`, `date`, `summary`, and `tags`. `readingTime` is derived from
the word count when omitted.
"#;

const SAMPLE_TIP: &str = r#"---
title: Name your tmux sessions
date: 2024-01-16
summary: Stop living in "0" and "1".
tags:
  - Tools
---

`tmux new -s review` starts a named session; `tmux a -t review` gets you
back into it.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    for kind in ContentKind::ALL {
        fs::create_dir_all(target_dir.join("content").join(kind.dir_name()))?;
    }

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG)?;
    }

    let sample_article = target_dir.join("content/articles/hello-world.md");
    if !sample_article.exists() {
        fs::write(&sample_article, SAMPLE_ARTICLE)?;
    }

    let sample_tip = target_dir.join("content/tips/tmux-sessions.md");
    if !sample_tip.exists() {
        fs::write(&sample_tip, SAMPLE_TIP)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStore;
    use crate::Site;

    #[test]
    fn test_init_creates_loadable_site() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();

        assert!(tmp.path().join("_config.yml").exists());
        assert!(tmp.path().join("content/dashboards").exists());

        let site = Site::new(tmp.path()).unwrap();
        let store = ContentStore::load(&site).unwrap();
        assert_eq!(store.get_by_kind(ContentKind::Article).len(), 1);
        assert_eq!(store.get_by_kind(ContentKind::Tip).len(), 1);
        assert_eq!(
            store.get_by_kind(ContentKind::Article)[0].slug,
            "hello-world"
        );
    }

    #[test]
    fn test_init_does_not_overwrite_config() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(tmp.path()).unwrap();

        let config = fs::read_to_string(tmp.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
