use std::path::PathBuf;

use clap::{Args, Parser, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the mdpage binary.
#[derive(Debug, Parser)]
#[command(
    name = "mdpage",
    version,
    about = "Render a Markdown document into a standalone HTML page with Mermaid diagrams"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "MDPAGE_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RenderOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Markdown source to render.
    #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Path of the HTML file to write; defaults to INPUT with an `html` extension.
    #[arg(short = 'o', long = "output", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Override the document title.
    #[arg(long = "title", value_name = "TITLE")]
    pub title: Option<String>,

    /// Override the `lang` attribute of the page.
    #[arg(long = "lang", value_name = "LANG")]
    pub lang: Option<String>,

    /// Override the ES module URL the Mermaid runtime is imported from.
    #[arg(long = "mermaid-module-url", value_name = "URL", value_hint = ValueHint::Url)]
    pub mermaid_module_url: Option<String>,

    /// Pass raw HTML embedded in the Markdown through to the page.
    #[arg(
        long = "allow-raw-html",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub allow_raw_html: Option<bool>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}
