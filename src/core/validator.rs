// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structural validation of mode specifications
//!
//! The builder only guarantees the shape of its input:
//! - Every mode has a non-empty name, unique across the whole input
//! - Every mode has at least one entry
//! - Every entry has at least one trigger
//!
//! Actions and trigger strings are opaque. Whether a host understands
//! them is the host's business.
//!
//! Validation walks the input in processing order and stops at the first
//! failure, so the reported error is always the earliest one.

use std::collections::HashSet;
use thiserror::Error;

use crate::core::types::{EntrySpec, ModeSpec};

/// Build errors
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BuildError {
    /// Mode at this input position has an empty name
    #[error("Mode #{index} has an empty name")]
    EmptyModeName { index: usize },

    /// Mode name already used by an earlier mode
    #[error("Duplicate mode name '{name}'")]
    DuplicateModeName { name: String },

    /// Mode has no entries
    #[error("Mode '{mode}' has no entries")]
    EmptyEntryList { mode: String },

    /// Entry has no triggers
    #[error("Entry for action '{action}' in mode '{mode}' has no triggers")]
    EmptyTriggerList { mode: String, action: String },
}

/// Validates a single entry of `mode`
pub fn validate_entry(mode: &str, entry: &EntrySpec) -> Result<(), BuildError> {
    if entry.triggers.is_empty() {
        return Err(BuildError::EmptyTriggerList {
            mode: mode.to_string(),
            action: entry.action.to_string(),
        });
    }

    Ok(())
}

/// Validates one mode in isolation (name and entries, not uniqueness)
pub fn validate_mode(index: usize, mode: &ModeSpec) -> Result<(), BuildError> {
    if mode.name.is_empty() {
        return Err(BuildError::EmptyModeName { index });
    }

    if mode.entries.is_empty() {
        return Err(BuildError::EmptyEntryList {
            mode: mode.name.clone(),
        });
    }

    for entry in &mode.entries {
        validate_entry(&mode.name, entry)?;
    }

    Ok(())
}

/// Validates the complete input before anything is built
///
/// The duplicate check for a mode runs before `validate_mode`, so a
/// duplicate mode with no entries reports `DuplicateModeName`.
pub fn validate_mode_specs(modes: &[ModeSpec]) -> Result<(), BuildError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(modes.len());

    for (index, mode) in modes.iter().enumerate() {
        // Earlier names already passed validate_mode, so none is empty
        if !seen.insert(mode.name.as_str()) {
            return Err(BuildError::DuplicateModeName {
                name: mode.name.clone(),
            });
        }

        validate_mode(index, mode)?;
    }

    Ok(())
}
