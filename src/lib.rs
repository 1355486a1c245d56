//! Render a Markdown document into a standalone HTML page whose fenced
//! `mermaid` blocks are drawn in the browser by the Mermaid runtime.

pub mod application;
pub mod config;
pub mod infra;
