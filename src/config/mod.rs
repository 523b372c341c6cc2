//! Mode file loading
//!
//! The core never touches the filesystem. This module is the host-side
//! path from a file on disk to built tables:
//!
//! - **Path expansion**: `~` is expanded to the home directory
//! - **Parsing**: line-oriented mode format (see `core::parser`)
//! - **Building**: all-or-nothing table construction
//!
//! # Example
//!
//! ```no_run
//! use mode_tables::config::load_mode_file;
//!
//! let tables = load_mode_file("~/.config/mode-tables/modes.conf")?;
//! for table in tables.tables() {
//!     println!("{}", table);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::parser::parse_mode_file;
use crate::core::{build, ModeSpec, ModeTables};

/// Expands a leading `~` in `path`.
pub fn expand_path(path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
    let path = path.as_ref();
    let raw = path
        .to_str()
        .ok_or_else(|| ConfigError::InvalidPath(path.to_path_buf()))?;

    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

/// Reads and parses a mode file without building it.
pub fn load_mode_specs(path: impl AsRef<Path>) -> Result<Vec<ModeSpec>, ConfigError> {
    let path = expand_path(path)?;

    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }

    let content = fs::read_to_string(&path)?;
    let modes = parse_mode_file(&content)?;

    debug!(path = %path.display(), modes = modes.len(), "parsed mode file");

    Ok(modes)
}

/// Reads, parses and builds a mode file.
pub fn load_mode_file(path: impl AsRef<Path>) -> Result<ModeTables, ConfigError> {
    let modes = load_mode_specs(path)?;
    let tables = build(&modes)?;

    info!(
        modes = tables.len(),
        reentry = tables.reentry().len(),
        "loaded mode tables"
    );

    Ok(tables)
}
