//! Built-in "mint" theme using the Tera template engine
//!
//! All templates and assets are embedded in the binary; a deployment is a
//! single executable plus a content directory.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::{date, url};

/// Embedded stylesheet served at /assets/style.css
pub const STYLE_CSS: &str = include_str!("mint/style.css");

/// Embedded widget script served at /assets/site.js
pub const SITE_JS: &str = include_str!("mint/site.js");

/// Template renderer with the embedded mint theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all mint templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("mint/layout.html")),
            ("index.html", include_str!("mint/index.html")),
            ("list.html", include_str!("mint/list.html")),
            ("detail.html", include_str!("mint/detail.html")),
            ("about.html", include_str!("mint/about.html")),
            ("404.html", include_str!("mint/404.html")),
            ("partials/card.html", include_str!("mint/partials/card.html")),
            (
                "partials/comments.html",
                include_str!("mint/partials/comments.html"),
            ),
            (
                "partials/newsletter.html",
                include_str!("mint/partials/newsletter.html"),
            ),
        ])?;

        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("tag_url", tag_url_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format an ISO date with a Moment.js-style pattern
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "MMMM DD, YYYY".to_string(),
    };

    let parsed = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| tera::Error::msg(format!("date_format: invalid date {:?}: {}", s, e)))?;
    Ok(tera::Value::String(date::format_date(&parsed, &format)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Tera filter: percent-encode a tag for use in a query string
fn tag_url_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("tag_url", "value", String, value);
    Ok(tera::Value::String(url::encode_query_value(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());
        context.insert("year", &2024);
        context
    }

    #[test]
    fn test_templates_parse() {
        // Bad template syntax fails here, not at first request
        TemplateRenderer::new().unwrap();
    }

    #[test]
    fn test_render_404() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render("404.html", &base_context()).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("TechTips"));
    }

    #[test]
    fn test_date_format_filter() {
        let mut args = HashMap::new();
        args.insert(
            "format".to_string(),
            tera::Value::String("MMM DD, YYYY".to_string()),
        );
        let out = date_format_filter(&tera::Value::String("2024-01-15".to_string()), &args).unwrap();
        assert_eq!(out, tera::Value::String("Jan 15, 2024".to_string()));
    }

    #[test]
    fn test_truncate_chars_filter() {
        let args = HashMap::new();
        let short = truncate_chars_filter(&tera::Value::String("short".into()), &args).unwrap();
        assert_eq!(short, tera::Value::String("short".to_string()));

        let long_input = "x".repeat(200);
        let out = truncate_chars_filter(&tera::Value::String(long_input), &args).unwrap();
        let out = out.as_str().unwrap().to_string();
        assert!(out.chars().count() <= 151);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_tag_url_filter() {
        let out = tag_url_filter(&tera::Value::String("Power BI".into()), &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("Power%20BI".to_string()));
    }
}
