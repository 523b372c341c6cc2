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

//! src/core/builder.rs
//!
//! Table builder
//!
//! Turns an ordered list of `ModeSpec`s into one `DispatchTable` per mode
//! and a global `ReentryIndex`, in a single forward pass.
//!
//! # Ordering
//! Modes are processed in list order, entries in list order, triggers in
//! list order. Every tie is settled by the last write:
//! - A trigger bound twice in one mode maps to the later action
//! - An action given re-entry by several entries re-enters the last mode
//!
//! Chaining needs no special construct. A mode B reachable by finishing a
//! sequence in mode A is written after A, with a non-exit-only entry for
//! the action that A lists as exit-only.
//!
//! # Failure
//! The whole input is validated before any table exists. A build either
//! returns every table or returns the first `BuildError`.
//!
//! # Performance
//! O(total triggers) time, O(distinct actions + distinct triggers) space.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::types::{DispatchTable, ModeSpec, ModeTables, ReentryIndex};
use crate::core::validator::{validate_mode_specs, BuildError};

/// Builds dispatch tables and the re-entry index from `modes`
///
/// Pure and deterministic: the same input always produces equal output,
/// and no state survives between calls.
///
/// # Example
/// ```ignore
/// let modes = vec![
///     ModeSpec::new("yank-only", vec![
///         EntrySpec::new("yank", ["a"]),
///         EntrySpec::new("yank_pop", ["b"]).exit_only(),
///     ]),
///     ModeSpec::new("yank-popping", vec![EntrySpec::new("yank_pop", ["b", "c"])]),
/// ];
/// let tables = build(&modes)?;
/// assert_eq!(tables.reentry_mode(&"yank_pop".into()), Some("yank-popping"));
/// ```
pub fn build(modes: &[ModeSpec]) -> Result<ModeTables, BuildError> {
    validate_mode_specs(modes)?;

    let mut tables = IndexMap::with_capacity(modes.len());
    let mut reentry = ReentryIndex::default();

    for mode in modes {
        let table = build_mode(mode, &mut reentry);

        debug!(
            mode = %mode.name,
            entries = mode.entries.len(),
            bindings = table.len(),
            "built dispatch table"
        );

        tables.insert(mode.name.clone(), table);
    }

    debug!(
        modes = tables.len(),
        reentry = reentry.len(),
        "mode tables complete"
    );

    Ok(ModeTables::from_parts(tables, reentry))
}

/// Builds one mode's table, recording re-entry ownership as it goes
///
/// Expects `mode` to be valid already.
fn build_mode(mode: &ModeSpec, reentry: &mut ReentryIndex) -> DispatchTable {
    let mut table = DispatchTable::new(mode.name.as_str());

    for entry in &mode.entries {
        for trigger in &entry.triggers {
            if let Some(previous) = table.bind(trigger, &entry.action) {
                if previous != entry.action {
                    trace!(
                        mode = %mode.name,
                        trigger = %trigger,
                        from = %previous,
                        to = %entry.action,
                        "trigger rebound"
                    );
                }
            }
        }

        // Exit-only entries are reachable from the table but never owned
        if entry.exit_only {
            continue;
        }

        if let Some(previous) = reentry.assign(&entry.action, &mode.name) {
            if previous != mode.name {
                trace!(
                    action = %entry.action,
                    from = %previous,
                    to = %mode.name,
                    "re-entry transferred"
                );
            }
        }
    }

    table
}
