use askama::Template;

use crate::application::render::types::RenderError;

use super::PageSettings;

#[derive(Template)]
#[template(path = "document.html")]
pub(crate) struct DocumentTemplate<'a> {
    pub(crate) title: &'a str,
    pub(crate) lang: &'a str,
    pub(crate) mermaid_module_url: &'a str,
    pub(crate) body: &'a str,
}

impl<'a> DocumentTemplate<'a> {
    pub(crate) fn new(page: &'a PageSettings, body: &'a str) -> Self {
        Self {
            title: page.title.as_str(),
            lang: page.lang.as_str(),
            mermaid_module_url: page.mermaid_module_url.as_str(),
            body,
        }
    }
}

pub(crate) fn render_document(page: &PageSettings, body: &str) -> Result<String, RenderError> {
    DocumentTemplate::new(page, body)
        .render()
        .map_err(|err| RenderError::Template {
            message: err.to_string(),
        })
}
