//! Markdown-to-page rendering.
//!
//! The rendering pipeline is kept pure: it accepts markdown input, produces
//! deterministic HTML output, and surfaces structured errors. Reading the
//! source and persisting the page happen in the caller.

mod service;
mod types;

pub use service::{ComrakConverter, DocumentRenderer, PageSettings};
pub use types::{MarkdownConverter, RenderError, RenderOutput};
