//! Application layer: the render pipeline and the errors surfaced to the binary.

pub mod error;
pub mod render;
