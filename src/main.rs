use std::process;

use clap::Parser;
use mdpage::{
    application::{
        error::AppError,
        render::{ComrakConverter, DocumentRenderer},
    },
    config::{self, CliArgs},
    infra::{fs, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let messages = error.messages();
    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?messages, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?messages, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let settings = config::load(&CliArgs::parse())?;

    telemetry::init(&settings.logging)?;

    let renderer = DocumentRenderer::new(
        ComrakConverter::from(&settings.render),
        settings.page.clone(),
    );

    let document = &settings.document;
    let markdown = fs::read_markdown(&document.input)?;
    let output = renderer.render(&markdown)?;
    fs::write_document(&document.output, &output.html)?;

    info!(
        input = %document.input.display(),
        output = %document.output.display(),
        mermaid_diagrams = output.mermaid_diagrams,
        html_bytes = output.html.len(),
        "Document rendered"
    );
    println!("Successfully created {}", document.output.display());

    Ok(())
}
