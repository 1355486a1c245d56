//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;
#[cfg(test)]
mod tests;

use std::{path::PathBuf, str::FromStr};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::render::PageSettings;

pub use cli::{CliArgs, RenderOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "mdpage";
const ENV_PREFIX: &str = "MDPAGE";
const DEFAULT_INPUT: &str = "smart_lock_documentation.md";
const OUTPUT_EXTENSION: &str = "html";
pub(crate) const DEFAULT_TITLE: &str = "Documentación Smart Lock";
pub(crate) const DEFAULT_LANG: &str = "es";
pub(crate) const DEFAULT_MERMAID_MODULE_URL: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub document: DocumentSettings,
    pub page: PageSettings,
    pub render: RenderSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct DocumentSettings {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub allow_raw_html: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    document: RawDocumentSettings,
    page: RawPageSettings,
    render: RawRenderSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &RenderOverrides) {
        if let Some(input) = overrides.input.as_ref() {
            self.document.input = Some(input.clone());
        }
        if let Some(output) = overrides.output.as_ref() {
            self.document.output = Some(output.clone());
        }
        if let Some(title) = overrides.title.as_ref() {
            self.page.title = Some(title.clone());
        }
        if let Some(lang) = overrides.lang.as_ref() {
            self.page.lang = Some(lang.clone());
        }
        if let Some(url) = overrides.mermaid_module_url.as_ref() {
            self.page.mermaid_module_url = Some(url.clone());
        }
        if let Some(allow) = overrides.allow_raw_html {
            self.render.allow_raw_html = Some(allow);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            document,
            page,
            render,
            logging,
        } = raw;

        Ok(Self {
            document: build_document_settings(document)?,
            page: build_page_settings(page)?,
            render: build_render_settings(render),
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_document_settings(document: RawDocumentSettings) -> Result<DocumentSettings, LoadError> {
    let input = document
        .input
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    if input.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "document.input",
            "path must not be empty",
        ));
    }

    let output = match document.output {
        Some(output) if output.as_os_str().is_empty() => {
            return Err(LoadError::invalid(
                "document.output",
                "path must not be empty",
            ));
        }
        Some(output) => output,
        None => input.with_extension(OUTPUT_EXTENSION),
    };

    if output == input {
        return Err(LoadError::invalid(
            "document.output",
            "must differ from document.input",
        ));
    }

    Ok(DocumentSettings { input, output })
}

fn build_page_settings(page: RawPageSettings) -> Result<PageSettings, LoadError> {
    let title = non_blank(page.title, DEFAULT_TITLE, "page.title")?;
    let lang = non_blank(page.lang, DEFAULT_LANG, "page.lang")?;

    let url_value = page
        .mermaid_module_url
        .unwrap_or_else(|| DEFAULT_MERMAID_MODULE_URL.to_string());
    let mermaid_module_url = parse_module_url(url_value.trim())
        .map_err(|reason| LoadError::invalid("page.mermaid_module_url", reason))?;

    Ok(PageSettings {
        title,
        lang,
        mermaid_module_url,
    })
}

fn build_render_settings(render: RawRenderSettings) -> RenderSettings {
    RenderSettings {
        allow_raw_html: render.allow_raw_html.unwrap_or(true),
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDocumentSettings {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPageSettings {
    title: Option<String>,
    lang: Option<String>,
    mermaid_module_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    allow_raw_html: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

fn non_blank(
    value: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, LoadError> {
    match value {
        None => Ok(default.to_string()),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(LoadError::invalid(key, "must not be empty"))
            } else {
                Ok(trimmed.to_string())
            }
        }
    }
}

/// Characters that would end the quoted module specifier or the `<script>` element.
const FORBIDDEN_MODULE_URL_CHARS: [char; 5] = ['\'', '"', '\\', '<', '>'];

fn parse_module_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|err| format!("invalid URL `{value}`: {err}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme `{other}`, expected http or https")),
    }

    if let Some(found) = url
        .as_str()
        .chars()
        .find(|ch| FORBIDDEN_MODULE_URL_CHARS.contains(ch))
    {
        return Err(format!(
            "URL `{url}` contains `{found}`, which is not allowed inside the module import"
        ));
    }

    Ok(url)
}
