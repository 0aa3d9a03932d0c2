//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Markdown renderer with syntax highlighting and heading anchors
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_theme("base16-ocean.dark")
    }

    /// Create with a custom highlighting theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is stripped before we get here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut heading: Option<Vec<Event>> = None;
        let mut anchors = Anchors::default();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Start(Tag::Heading { .. }) => {
                    heading = Some(vec![event]);
                }
                Event::End(TagEnd::Heading(_)) => {
                    let mut buffered = heading.take().unwrap_or_default();
                    buffered.push(event);
                    events.extend(anchors.assign(buffered));
                }
                _ => match heading.as_mut() {
                    Some(buffered) => buffered.push(event),
                    None => events.push(event),
                },
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

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(html) => format!(r#"<div class="highlight">{}</div>"#, html),
            None => format!(
                r#"<div class="highlight"><pre><code class="language-{}">{}</code></pre></div>"#,
                lang,
                crate::helpers::escape_html(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique heading ids within one document
#[derive(Default)]
struct Anchors {
    seen: HashMap<String, usize>,
}

impl Anchors {
    /// Give a buffered heading (start, inline events, end) an id if it has none
    fn assign<'a>(&mut self, mut buffered: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let text: String = buffered
            .iter()
            .filter_map(|e| match e {
                Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
                _ => None,
            })
            .collect();

        if let Some(Event::Start(Tag::Heading { id, .. })) = buffered.first_mut() {
            if id.is_none() {
                *id = Some(CowStr::from(self.unique(&text)));
            }
        }

        buffered
    }

    fn unique(&mut self, text: &str) -> String {
        let mut base = slug::slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }

        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{}_{}", base, *count - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Hello *World*\n\nThis is a test.").unwrap();
        assert!(html.contains("<em>World</em>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_ids() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("# Hello World\n\n## Setup\n\n## Setup\n\n## Custom {#mine}")
            .unwrap();
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains(r#"<h2 id="setup">Setup</h2>"#));
        assert!(html.contains(r#"<h2 id="setup_1">Setup</h2>"#));
        assert!(html.contains(r#"<h2 id="mine">Custom</h2>"#));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<div class="highlight">"#));
        assert!(html.contains("main"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_render_table_and_smart_quotes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n\n\"quoted\"")
            .unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("\u{201c}quoted\u{201d}"));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("<div class=\"diagram\">x</div>\n\ntext")
            .unwrap();
        assert!(html.contains("<div class=\"diagram\">x</div>"));
    }

    #[test]
    fn test_ethiopic_text() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("ሰላም ዓለም").unwrap();
        assert!(html.contains("ሰላም ዓለም"));
    }
}
