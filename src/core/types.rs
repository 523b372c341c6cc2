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

//! src/core/types.rs
//!
//! Core type definitions for mode table construction
//!
//! This module defines the input and output types of the table builder:
//! - `Action`: Opaque identifier of an operation the host can invoke
//! - `EntrySpec`: One action and the triggers bound to it inside a mode
//! - `ModeSpec`: A named mode made of ordered entries
//! - `DispatchTable`: Per-mode trigger → action lookup (output)
//! - `ReentryIndex`: Global action → mode ownership (output)
//! - `ModeTables`: Both outputs of a single build
//!
//! Output maps are `IndexMap`s, so iteration and serialisation follow the
//! order in which keys were first written. Outputs expose read-only
//! accessors; the only way to change them is to build again.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque action identifier
///
/// The builder never interprets actions. Two actions are the same action
/// exactly when their identifiers are equal.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Action {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Action {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One action and its triggers within a mode
///
/// # Example
/// ```ignore
/// let entry = EntrySpec::new("yank_pop", ["M-y"]).exit_only();
/// // Reachable from the mode's table, but never re-enters it
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntrySpec {
    /// Action bound by every trigger of this entry
    pub action: Action,

    /// Trigger strings in processing order (at least one)
    pub triggers: Vec<String>,

    /// When true, invoking `action` outside the mode must not re-enter it
    #[serde(default)]
    pub exit_only: bool,
}

impl EntrySpec {
    /// Create an entry that owns re-entry into its mode
    pub fn new<I, S>(action: impl Into<Action>, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action: action.into(),
            triggers: triggers.into_iter().map(Into::into).collect(),
            exit_only: false,
        }
    }

    /// Mark this entry as exit-only
    pub fn exit_only(mut self) -> Self {
        self.exit_only = true;
        self
    }
}

impl fmt::Display for EntrySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.exit_only { "exit" } else { "bind" };
        write!(f, "{} = {}", keyword, self.action)?;

        for trigger in &self.triggers {
            write!(f, ", {}", trigger)?;
        }

        Ok(())
    }
}

/// One named mode to be built
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModeSpec {
    /// Unique, non-empty mode name
    pub name: String,

    /// Entries in processing order
    pub entries: Vec<EntrySpec>,
}

impl ModeSpec {
    pub fn new(name: impl Into<String>, entries: Vec<EntrySpec>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }
}

/// Trigger → action lookup for one mode
///
/// Every trigger resolves to exactly one action. A trigger written twice
/// keeps its first position and takes the later action.
///
/// Output only: it serialises for hosts but cannot be deserialised, so
/// every table in existence came from `build`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DispatchTable {
    mode_name: String,
    bindings: IndexMap<String, Action>,
}

impl DispatchTable {
    pub(crate) fn new(mode_name: impl Into<String>) -> Self {
        Self {
            mode_name: mode_name.into(),
            bindings: IndexMap::new(),
        }
    }

    /// Writes a binding, returning the action it replaced (if any)
    pub(crate) fn bind(&mut self, trigger: &str, action: &Action) -> Option<Action> {
        self.bindings.insert(trigger.to_string(), action.clone())
    }

    pub fn mode_name(&self) -> &str {
        &self.mode_name
    }

    /// Looks up the action bound to `trigger`
    pub fn get(&self, trigger: &str) -> Option<&Action> {
        self.bindings.get(trigger)
    }

    /// All bindings in first-write order
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.bindings.iter().map(|(t, a)| (t.as_str(), a))
    }

    /// Distinct bound actions, in order of their first binding
    pub fn actions(&self) -> Vec<&Action> {
        let mut seen = Vec::new();
        for action in self.bindings.values() {
            if !seen.contains(&action) {
                seen.push(action);
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.mode_name)?;

        for (i, (trigger, action)) in self.bindings.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", trigger, action)?;
        }

        write!(f, " }}")
    }
}

/// Action → re-entry mode ownership
///
/// Each action owns re-entry into at most one mode. Assigning an action
/// again replaces its previous owner.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReentryIndex {
    owners: IndexMap<Action, String>,
}

impl ReentryIndex {
    /// Assigns `action` to `mode`, returning the previous owner (if any)
    pub(crate) fn assign(&mut self, action: &Action, mode: &str) -> Option<String> {
        self.owners.insert(action.clone(), mode.to_string())
    }

    /// Mode that `action` re-enters when invoked outside any active mode
    pub fn mode_for(&self, action: &Action) -> Option<&str> {
        self.owners.get(action).map(String::as_str)
    }

    pub fn contains(&self, action: &Action) -> bool {
        self.owners.contains_key(action)
    }

    /// Actions whose re-entry points at `mode`
    pub fn actions_entering<'a>(&'a self, mode: &'a str) -> impl Iterator<Item = &'a Action> + 'a {
        self.owners
            .iter()
            .filter(move |(_, owner)| owner.as_str() == mode)
            .map(|(action, _)| action)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Action, &str)> {
        self.owners.iter().map(|(a, m)| (a, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Result of one build: every dispatch table plus the re-entry index
///
/// Like its parts, it can be serialised but not deserialised:
///
/// ```compile_fail
/// let tables: mode_tables::ModeTables = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ModeTables {
    tables: IndexMap<String, DispatchTable>,
    reentry: ReentryIndex,
}

impl ModeTables {
    pub(crate) fn from_parts(tables: IndexMap<String, DispatchTable>, reentry: ReentryIndex) -> Self {
        Self { tables, reentry }
    }

    pub fn table(&self, mode: &str) -> Option<&DispatchTable> {
        self.tables.get(mode)
    }

    /// Tables in input order
    pub fn tables(&self) -> impl Iterator<Item = &DispatchTable> {
        self.tables.values()
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn reentry(&self) -> &ReentryIndex {
        &self.reentry
    }

    pub fn reentry_mode(&self, action: &Action) -> Option<&str> {
        self.reentry.mode_for(action)
    }

    /// Action bound to `trigger` while `mode` is active
    pub fn lookup(&self, mode: &str, trigger: &str) -> Option<&Action> {
        self.tables.get(mode).and_then(|table| table.get(trigger))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Hands both artifacts to the host
    pub fn into_parts(self) -> (IndexMap<String, DispatchTable>, ReentryIndex) {
        (self.tables, self.reentry)
    }
}
