mod config;
mod mermaid;
mod template;

use comrak::{Arena, format_html, parse_document};
use tracing::{debug, warn};
use url::Url;

use crate::application::render::types::{MarkdownConverter, RenderError, RenderOutput};
use crate::config::{DEFAULT_LANG, DEFAULT_MERMAID_MODULE_URL, DEFAULT_TITLE};

use self::config::default_options;
use self::mermaid::{MermaidRewrite, rewrite_mermaid_blocks};
use self::template::render_document;

/// Template parameters for the standalone page wrapping the converted body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub title: String,
    pub lang: String,
    /// ES module URL the page imports the Mermaid runtime from.
    pub mermaid_module_url: Url,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            lang: DEFAULT_LANG.to_string(),
            mermaid_module_url: Url::parse(DEFAULT_MERMAID_MODULE_URL)
                .expect("default Mermaid module URL must be valid"),
        }
    }
}

/// Comrak-backed converter with tables and fenced code blocks enabled.
pub struct ComrakConverter {
    options: comrak::Options<'static>,
}

impl ComrakConverter {
    pub fn new(allow_raw_html: bool) -> Self {
        Self {
            options: default_options(allow_raw_html),
        }
    }
}

impl Default for ComrakConverter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl From<&crate::config::RenderSettings> for ComrakConverter {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self::new(settings.allow_raw_html)
    }
}

impl MarkdownConverter for ComrakConverter {
    fn convert(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html).map_err(|err| RenderError::Markdown {
            message: err.to_string(),
        })?;
        Ok(html)
    }
}

/// Turns a Markdown document into a complete HTML page.
///
/// The pipeline is pure: convert, wrap in the page template, then rewrite
/// Mermaid code blocks. Nothing here touches the filesystem.
pub struct DocumentRenderer<C = ComrakConverter> {
    converter: C,
    page: PageSettings,
}

impl<C: MarkdownConverter> DocumentRenderer<C> {
    pub fn new(converter: C, page: PageSettings) -> Self {
        Self { converter, page }
    }

    pub fn render(&self, markdown: &str) -> Result<RenderOutput, RenderError> {
        let fragment = convert_stage(&self.converter, markdown)?;
        let document = template_stage(&self.page, &fragment)?;
        let MermaidRewrite {
            html,
            diagrams,
            closing_tags,
        } = rewrite_stage(&document);

        let output = RenderOutput {
            html,
            mermaid_diagrams: diagrams,
            rewritten_closing_tags: closing_tags,
        };

        if output.unpaired_closing_tags() > 0 {
            warn!(
                target = "application::render::mermaid",
                op = "render::rewrite",
                mermaid_diagrams = output.mermaid_diagrams,
                rewritten_closing_tags = output.rewritten_closing_tags,
                unpaired = output.unpaired_closing_tags(),
                "Closing tags of non-Mermaid code blocks were rewritten to </div>; markup is unbalanced"
            );
        }

        Ok(output)
    }
}

impl Default for DocumentRenderer<ComrakConverter> {
    fn default() -> Self {
        Self::new(ComrakConverter::default(), PageSettings::default())
    }
}

fn convert_stage<C: MarkdownConverter>(
    converter: &C,
    markdown: &str,
) -> Result<String, RenderError> {
    let fragment = converter.convert(markdown)?;
    debug!(
        target = "application::render",
        op = "render::convert",
        markdown_bytes = markdown.len(),
        fragment_bytes = fragment.len(),
        "Markdown converted"
    );
    Ok(fragment)
}

fn template_stage(page: &PageSettings, fragment: &str) -> Result<String, RenderError> {
    render_document(page, fragment)
}

fn rewrite_stage(document: &str) -> MermaidRewrite {
    let rewrite = rewrite_mermaid_blocks(document);
    debug!(
        target = "application::render::mermaid",
        op = "render::rewrite",
        mermaid_diagrams = rewrite.diagrams,
        rewritten_closing_tags = rewrite.closing_tags,
        "Mermaid blocks rewritten"
    );
    rewrite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comrak_renders_fenced_block_with_language_class() {
        let html = ComrakConverter::default()
            .convert("```mermaid\nA-->B\n```\n")
            .expect("conversion succeeds");
        assert_eq!(
            html,
            "<pre><code class=\"language-mermaid\">A--&gt;B\n</code></pre>\n"
        );
    }

    #[test]
    fn comrak_passes_raw_html_only_when_allowed() {
        let markdown = "<span>raw</span>\n";
        let allowed = ComrakConverter::new(true)
            .convert(markdown)
            .expect("conversion succeeds");
        let blocked = ComrakConverter::new(false)
            .convert(markdown)
            .expect("conversion succeeds");

        assert!(allowed.contains("<span>raw</span>"));
        assert!(!blocked.contains("<span>raw</span>"));
    }

    #[test]
    fn converter_errors_propagate_unchanged() {
        let failing = |_: &str| -> Result<String, RenderError> {
            Err(RenderError::Markdown {
                message: "boom".to_string(),
            })
        };
        let renderer = DocumentRenderer::new(failing, PageSettings::default());

        match renderer.render("# Title") {
            Err(RenderError::Markdown { message }) => assert_eq!(message, "boom"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn renderer_reports_rewrite_counts() {
        let renderer: DocumentRenderer = DocumentRenderer::default();
        let output = renderer
            .render("```mermaid\nA-->B\n```\n\n```sh\nls\n```\n")
            .expect("render succeeds");

        assert_eq!(output.mermaid_diagrams, 1);
        assert_eq!(output.rewritten_closing_tags, 2);
        assert_eq!(output.unpaired_closing_tags(), 1);
    }
}
