//! Reading the source document and persisting the rendered page.

use std::{fs, path::Path};

use tracing::{debug, info};

use super::error::InfraError;

/// Read the whole Markdown source into memory, rejecting invalid UTF-8.
pub fn read_markdown(path: &Path) -> Result<String, InfraError> {
    let bytes = fs::read(path).map_err(|source| InfraError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let byte_len = bytes.len();

    let text = String::from_utf8(bytes).map_err(|source| InfraError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        target = "infra::fs",
        op = "fs::read_markdown",
        path = %path.display(),
        bytes = byte_len,
        "Markdown source loaded"
    );
    Ok(text)
}

/// Write the rendered page, replacing any existing file.
pub fn write_document(path: &Path, html: &str) -> Result<(), InfraError> {
    fs::write(path, html).map_err(|source| InfraError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        target = "infra::fs",
        op = "fs::write_document",
        path = %path.display(),
        bytes = html.len(),
        "HTML document written"
    );
    Ok(())
}
