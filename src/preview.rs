use crate::config::Config;
use crate::html::escape_into;
use crate::render_with_config;

/// Rendered view of a Markdown source that changes over time.
///
/// Keeps the raw source next to its HTML so the display side can show both,
/// and so exports always get the original Markdown, never the HTML.
/// Re-renders only when the source actually changes.
#[derive(Debug, Clone, Default)]
pub struct Preview {
    config: Config,
    markdown: String,
    html: String,
}

impl Preview {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            markdown: String::new(),
            html: String::new(),
        }
    }

    /// Replace the source. Returns `true` if the HTML was re-rendered.
    pub fn set_markdown(&mut self, markdown: &str) -> bool {
        if self.markdown == markdown {
            return false;
        }

        self.markdown = markdown.to_string();
        self.html = render_with_config(&self.markdown, &self.config);
        tracing::debug!(
            source_len = self.markdown.len(),
            html_len = self.html.len(),
            "re-rendered preview"
        );
        true
    }

    /// The source exactly as last given.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Two-panel section: the raw source (optional) and the rendered HTML.
    pub fn to_page(&self) -> String {
        let preview = &self.config.preview;
        let mut out = String::new();

        out.push_str("<section class=\"preview-section\"><div class=\"preview-container\">");

        if preview.raw_panel {
            out.push_str("<div class=\"preview-raw\"><h3>");
            escape_into(&preview.raw_title, &mut out);
            out.push_str("</h3><pre class=\"markdown-code\"><code>");
            escape_into(&self.markdown, &mut out);
            out.push_str("</code></pre></div>");
        }

        out.push_str("<div class=\"preview-rendered\"><h3>");
        escape_into(&preview.rendered_title, &mut out);
        out.push_str("</h3><div class=\"markdown-preview\">");
        out.push_str(&self.html);
        out.push_str("</div></div>");

        out.push_str("</div></section>");
        out
    }
}
