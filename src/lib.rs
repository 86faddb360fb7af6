mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod preview;

pub use block::{Block, List, ListItem, Span};
pub use config::{CodeConfig, Config, ParagraphConfig, PreviewConfig, SoftBreak};
pub use error::{Error, Result};
pub use preview::Preview;

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Convert markdown to an HTML fragment using the default config.
///
/// Never fails: malformed input (unterminated fences, stray `*` or backticks)
/// still produces output. All source text is HTML-escaped.
pub fn render(markdown: &str) -> String {
    render_with_config(markdown, Config::compiled_default())
}

/// Convert markdown to an HTML fragment with custom config.
pub fn render_with_config(markdown: &str, config: &Config) -> String {
    let blocks = parse(markdown);
    html::blocks_to_html(&blocks, config)
}
