use thiserror::Error;

/// Deterministic rendering result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Complete HTML document, template included.
    pub html: String,
    /// Number of `<pre><code class="language-mermaid">` openings turned into diagram containers.
    pub mermaid_diagrams: usize,
    /// Number of `</code></pre>` sequences turned into `</div>`, paired or not.
    pub rewritten_closing_tags: usize,
}

impl RenderOutput {
    /// Closing tags that were rewritten without a Mermaid opening to pair with.
    ///
    /// A non-zero value means some ordinary code block now ends in `</div>`
    /// while still opening with `<pre><code>`.
    pub fn unpaired_closing_tags(&self) -> usize {
        self.rewritten_closing_tags
            .saturating_sub(self.mermaid_diagrams)
    }

    pub fn contains_mermaid(&self) -> bool {
        self.mermaid_diagrams > 0
    }
}

/// Structured errors surfaced by the rendering pipeline.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("markdown conversion failed: {message}")]
    Markdown { message: String },
    #[error("document template rendering failed: {message}")]
    Template { message: String },
}

/// Converts Markdown source into an HTML fragment.
///
/// Implementations must be pure and deterministic: given the same input they
/// return identical outputs or errors.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, markdown: &str) -> Result<String, RenderError>;
}

impl<F> MarkdownConverter for F
where
    F: Fn(&str) -> Result<String, RenderError> + Send + Sync,
{
    fn convert(&self, markdown: &str) -> Result<String, RenderError> {
        self(markdown)
    }
}
