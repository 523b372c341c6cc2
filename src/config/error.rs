use std::path::PathBuf;
use thiserror::Error;

use crate::core::parser::ParseError;
use crate::core::BuildError;

/// Errors that can occur while loading a mode file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Mode file does not exist.
    #[error("Mode file not found: {0}")]
    NotFound(PathBuf),
    /// Path is not valid UTF-8 and cannot be expanded.
    #[error("Invalid path encoding: {0}")]
    InvalidPath(PathBuf),
    /// Mode file could not be parsed.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// Parsed modes were rejected by the builder.
    #[error("Invalid modes: {0}")]
    Build(#[from] BuildError),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
