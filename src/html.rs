use crate::block::{Block, List, Span};
use crate::config::{Config, SoftBreak};

/// Convert blocks to an HTML fragment. Blocks carry their own wrapping tags
/// and are concatenated in order with no separator.
pub fn blocks_to_html(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    for block in blocks {
        block_to_html(block, config, &mut out);
    }

    out
}

fn block_to_html(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            spans_to_html(content, config, out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, config, out);
            out.push_str("</p>");
        }
        Block::CodeBlock { language, content } => {
            match language {
                Some(lang) if config.code.language_class => {
                    out.push_str("<pre><code class=\"language-");
                    escape_into(lang, out);
                    out.push_str("\">");
                }
                _ => out.push_str("<pre><code>"),
            }
            // <pre> keeps line feeds as they are
            escape_into(content, out);
            out.push_str("</code></pre>");
        }
        Block::List(list) => list_to_html(list, config, out),
    }
}

fn spans_to_html(spans: &[Span], config: &Config, out: &mut String) {
    for span in spans {
        span_to_html(span, config, out);
    }
}

fn span_to_html(span: &Span, config: &Config, out: &mut String) {
    match span {
        Span::Text(text) => escape_into(text, out),
        Span::Bold(text) => {
            out.push_str("<strong>");
            escape_into(text, out);
            out.push_str("</strong>");
        }
        Span::Italic(text) => {
            out.push_str("<em>");
            escape_into(text, out);
            out.push_str("</em>");
        }
        Span::Code(text) => {
            out.push_str("<code>");
            escape_into(text, out);
            out.push_str("</code>");
        }
        Span::LineBreak => match config.paragraph.soft_break {
            SoftBreak::Br => out.push_str("<br>"),
            SoftBreak::Space => out.push(' '),
        },
    }
}

fn list_to_html(list: &List, config: &Config, out: &mut String) {
    out.push_str("<ul>");
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(&item.content, config, out);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

/// Append `text` with `& < > " '` replaced by entities.
pub(crate) fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
}
