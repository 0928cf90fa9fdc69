//! Markdown rendering with syntax highlighting
//!
//! Headings h1-h4 get an `id` attribute derived with [`toc::heading_id`],
//! the same function the TOC extractor uses on the raw markdown.

use anyhow::Result;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::toc;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

/// A heading whose events are buffered until its text is known
struct PendingHeading<'a> {
    level: HeadingLevel,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    text: String,
    events: Vec<Event<'a>>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with default settings
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom highlight settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut heading: Option<PendingHeading> = None;
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let highlighted = self.highlight_code(&code_content, code_lang.as_deref());
                    push_event(&mut events, &mut heading, Event::Html(CowStr::from(highlighted)));
                    code_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_content.push_str(&text);
                }
                Event::Start(Tag::Heading {
                    level,
                    id: None,
                    classes,
                    attrs,
                }) if wants_id(level) => {
                    heading = Some(PendingHeading {
                        level,
                        classes,
                        attrs,
                        text: String::new(),
                        events: Vec::new(),
                    });
                }
                Event::End(TagEnd::Heading(level)) if heading.is_some() => {
                    if let Some(pending) = heading.take() {
                        let id = toc::heading_id(&pending.text);
                        let id = (!id.is_empty()).then(|| CowStr::from(id));
                        events.push(Event::Start(Tag::Heading {
                            level: pending.level,
                            id,
                            classes: pending.classes,
                            attrs: pending.attrs,
                        }));
                        events.extend(pending.events);
                        events.push(Event::End(TagEnd::Heading(level)));
                    }
                }
                Event::Text(text) => {
                    if let Some(pending) = &mut heading {
                        pending.text.push_str(&text);
                        pending.events.push(Event::Text(text));
                    } else {
                        events.push(Event::Text(text));
                    }
                }
                Event::Code(code) => {
                    if let Some(pending) = &mut heading {
                        pending.text.push_str(&code);
                        pending.events.push(Event::Code(code));
                    } else {
                        events.push(Event::Code(code));
                    }
                }
                other => push_event(&mut events, &mut heading, other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let Some(theme) = theme else {
            let escaped = html_escape(code);
            return format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, escaped
            );
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.line_numbers {
                    self.add_line_numbers(&highlighted, lang)
                } else {
                    format!(r#"<div class="highlight {}">{}</div>"#, lang, highlighted)
                }
            }
            Err(_) => {
                let escaped = html_escape(code);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang, escaped
                )
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();
        let line_count = lines.len();

        let mut gutter = String::new();
        let mut code_lines = String::new();

        for (i, line) in lines.iter().enumerate() {
            gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
            code_lines.push_str(line);
            if i < line_count - 1 {
                gutter.push('\n');
                code_lines.push('\n');
            }
        }

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang, gutter, code_lines
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Only h1-h4 get anchor ids, matching what the TOC and in-page links use
fn wants_id(level: HeadingLevel) -> bool {
    matches!(
        level,
        HeadingLevel::H1 | HeadingLevel::H2 | HeadingLevel::H3 | HeadingLevel::H4
    )
}

/// Route an event either into the pending heading buffer or the output
fn push_event<'a>(
    events: &mut Vec<Event<'a>>,
    heading: &mut Option<PendingHeading<'a>>,
    event: Event<'a>,
) {
    if let Some(pending) = heading {
        pending.events.push(event);
    } else {
        events.push(event);
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Some *emphasis* here.").unwrap();
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_heading_ids_assigned() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Getting Started!\n\ntext\n").unwrap();
        assert!(html.contains(r#"<h2 id="getting-started">Getting Started!</h2>"#));
    }

    #[test]
    fn test_heading_id_matches_toc() {
        let md = "## Async & Await in Rust\n\n### Pin, Unpin!\n";
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(md).unwrap();
        for item in toc::extract(md) {
            assert!(
                html.contains(&format!(r#"id="{}""#, item.id)),
                "rendered html is missing anchor {}",
                item.id
            );
        }
    }

    #[test]
    fn test_heading_with_inline_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Using `tokio::spawn` safely\n").unwrap();
        assert!(html.contains(r#"id="using-tokio-spawn-safely""#));
        assert!(html.contains("<code>tokio::spawn</code>"));
    }

    #[test]
    fn test_h5_not_id_tagged() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("##### Fine Print\n").unwrap();
        assert!(html.contains("<h5>Fine Print</h5>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_code_block_with_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", true);
        let html = renderer.render("```\na\nb\n```").unwrap();
        assert!(html.contains("line-number"));
        assert!(html.contains("gutter"));
    }
}
