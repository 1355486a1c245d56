//! Rewrites fenced `mermaid` code blocks into the container markup the
//! browser-side Mermaid script scans for.

const MERMAID_CODE_OPEN: &str = "<pre><code class=\"language-mermaid\">";
const CODE_BLOCK_CLOSE: &str = "</code></pre>";
const DIAGRAM_OPEN: &str = "<div class=\"mermaid\">";
const DIAGRAM_CLOSE: &str = "</div>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MermaidRewrite {
    pub(crate) html: String,
    pub(crate) diagrams: usize,
    pub(crate) closing_tags: usize,
}

/// Literal substitution over the assembled document.
///
/// Every Mermaid opening tag becomes a diagram container, then every
/// `</code></pre>` becomes `</div>`. The closing rewrite is not paired with
/// the opening one: closing tags of ordinary code blocks are rewritten too.
/// Callers observe this through `closing_tags > diagrams`.
pub(crate) fn rewrite_mermaid_blocks(html: &str) -> MermaidRewrite {
    let diagrams = html.matches(MERMAID_CODE_OPEN).count();
    let opened = html.replace(MERMAID_CODE_OPEN, DIAGRAM_OPEN);

    let closing_tags = opened.matches(CODE_BLOCK_CLOSE).count();
    let html = opened.replace(CODE_BLOCK_CLOSE, DIAGRAM_CLOSE);

    MermaidRewrite {
        html,
        diagrams,
        closing_tags,
    }
}
