//! Rendering of user-written text such as organization descriptions.

use askama::filters::{Html, escape};
use orghome_core::{Error, Result};

/// Turns raw user text into HTML that is safe to embed in a page.
pub trait MarkupRenderer: Send + Sync {
    fn render_string(&self, raw: &str) -> Result<String>;
}

/// Escapes HTML, wraps blank-line separated blocks in `<p>` and keeps single
/// line breaks as `<br>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl MarkupRenderer for PlainTextRenderer {
    fn render_string(&self, raw: &str) -> Result<String> {
        if raw.contains('\0') {
            return Err(Error::Render("text contains a NUL byte".to_string()));
        }

        let normalized = raw.replace("\r\n", "\n");
        let paragraphs: Vec<String> = normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let lines: Vec<String> = p.lines().map(escape_html).collect();
                format!("<p>{}</p>", lines.join("<br>\n"))
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

fn escape_html(text: &str) -> String {
    let Ok(escaped) = escape(text, Html);
    escaped.to_string()
}
