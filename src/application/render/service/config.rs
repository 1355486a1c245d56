use comrak::options::Options;

/// Comrak options matching the classic "tables + fenced code" converter setup.
///
/// Fenced code blocks are core CommonMark in comrak, so only the table
/// extension needs switching on. `github_pre_lang` stays off so fenced blocks
/// render as `<pre><code class="language-xxx">`, which the Mermaid rewrite
/// relies on.
pub(crate) fn default_options(allow_raw_html: bool) -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options, allow_raw_html);
    options
}

fn configure_extensions(options: &mut Options<'static>, allow_raw_html: bool) {
    let ext = &mut options.extension;
    ext.table = true;
    ext.tagfilter = false;

    let render = &mut options.render;
    render.github_pre_lang = false;
    render.full_info_string = false;
    render.r#unsafe = allow_raw_html;
    render.sourcepos = false;
}
