use std::path::Path;

use clap::Parser;

use super::*;

#[test]
fn defaults_reproduce_the_fixed_document_names() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(
        settings.document.input,
        Path::new("smart_lock_documentation.md")
    );
    assert_eq!(
        settings.document.output,
        Path::new("smart_lock_documentation.html")
    );
    assert_eq!(settings.page, PageSettings::default());
    assert!(settings.render.allow_raw_html);
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn output_is_derived_from_input() {
    let mut raw = RawSettings::default();
    raw.apply_overrides(&RenderOverrides {
        input: Some("docs/guide.markdown".into()),
        ..Default::default()
    });

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.document.output, Path::new("docs/guide.html"));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.document.output = Some("from-file.html".into());
    raw.page.title = Some("File title".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = RenderOverrides {
        output: Some("from-cli.html".into()),
        title: Some("CLI title".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.document.output, Path::new("from-cli.html"));
    assert_eq!(settings.page.title, "CLI title");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn unset_overrides_keep_file_values() {
    let mut raw = RawSettings::default();
    raw.page.lang = Some("en".to_string());
    raw.render.allow_raw_html = Some(false);

    raw.apply_overrides(&RenderOverrides::default());
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.page.lang, "en");
    assert!(!settings.render.allow_raw_html);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    raw.apply_overrides(&RenderOverrides {
        log_json: Some(true),
        ..Default::default()
    });

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn rejects_unparseable_log_level() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn rejects_non_http_module_url() {
    let mut raw = RawSettings::default();
    raw.page.mermaid_module_url = Some("file:///tmp/mermaid.mjs".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid url");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "page.mermaid_module_url",
            ..
        }
    ));
}

#[test]
fn rejects_relative_module_url() {
    let mut raw = RawSettings::default();
    raw.page.mermaid_module_url = Some("mermaid.esm.min.mjs".to_string());

    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn rejects_module_url_that_closes_the_import_string() {
    let mut raw = RawSettings::default();
    raw.page.mermaid_module_url = Some("https://x.test/a';alert(1);//.mjs".to_string());

    let err = Settings::from_raw(raw).expect_err("quote in path must be rejected");
    match err {
        LoadError::Invalid { key, reason } => {
            assert_eq!(key, "page.mermaid_module_url");
            assert!(reason.contains('\''), "unexpected reason: {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn module_url_characters_are_encoded_or_rejected() {
    for candidate in [
        "https://x.test/a'b.mjs",
        "https://x.test/a<b.mjs",
        "https://x.test/a\\b.mjs",
        "https://x.test/m.mjs?v=1'",
    ] {
        let mut raw = RawSettings::default();
        raw.page.mermaid_module_url = Some(candidate.to_string());

        if let Ok(settings) = Settings::from_raw(raw) {
            let serialized = settings.page.mermaid_module_url.as_str();
            assert!(
                !serialized.contains(['\'', '"', '\\', '<', '>']),
                "{candidate} was accepted as {serialized}"
            );
        }
    }
}

#[test]
fn accepts_custom_module_url() {
    let mut raw = RawSettings::default();
    raw.page.mermaid_module_url =
        Some("https://unpkg.com/mermaid@11/dist/mermaid.esm.min.mjs".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(
        settings.page.mermaid_module_url.as_str(),
        "https://unpkg.com/mermaid@11/dist/mermaid.esm.min.mjs"
    );
}

#[test]
fn rejects_blank_title() {
    let mut raw = RawSettings::default();
    raw.page.title = Some("   ".to_string());

    let err = Settings::from_raw(raw).expect_err("blank title");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "page.title",
            ..
        }
    ));
}

#[test]
fn rejects_output_equal_to_input() {
    let mut raw = RawSettings::default();
    raw.document.input = Some("page.html".into());

    let err = Settings::from_raw(raw).expect_err("output would clobber input");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "document.output",
            ..
        }
    ));
}

#[test]
fn parse_positional_input_and_flags() {
    let args = CliArgs::parse_from([
        "mdpage",
        "notes.md",
        "-o",
        "site/notes.html",
        "--title",
        "Notes",
        "--allow-raw-html",
        "no",
        "--log-json",
        "true",
    ]);

    let overrides = args.overrides;
    assert_eq!(overrides.input.as_deref(), Some(Path::new("notes.md")));
    assert_eq!(
        overrides.output.as_deref(),
        Some(Path::new("site/notes.html"))
    );
    assert_eq!(overrides.title.as_deref(), Some("Notes"));
    assert_eq!(overrides.allow_raw_html, Some(false));
    assert_eq!(overrides.log_json, Some(true));
    assert!(overrides.lang.is_none());
}

#[test]
fn parse_without_arguments() {
    let args = CliArgs::parse_from(["mdpage"]);
    assert!(args.overrides.input.is_none());
    assert!(args.overrides.output.is_none());
}
