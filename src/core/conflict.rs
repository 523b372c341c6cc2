//! Override detection for mode specifications
//!
//! The builder settles every tie by the last write, silently. This module
//! finds the places where that happened so they can be reported:
//! - A trigger bound to different actions inside one mode
//! - An action given re-entry by different modes
//!
//! Trigger shadowing is usually a mistake. Re-entry transfers are how
//! modes chain, so they are informational.
//!
//! # Performance
//! - Add mode: O(t) where t = number of triggers in the mode
//! - Check override: O(1) average case
//! - List all overrides: O(n) where n = number of unique keys tracked

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::types::{Action, ModeSpec};

/// Detects last-write-wins overrides using IndexMap-based indexing.
///
/// Keys are (mode, trigger) pairs and actions; values are every distinct
/// target in processing order. An override exists when a list holds more
/// than one value.
pub struct OverrideDetector {
    /// Maps (mode, trigger) to the distinct actions written to it.
    triggers: IndexMap<(String, String), Vec<Action>>,

    /// Maps action to the distinct modes that claimed re-entry.
    owners: IndexMap<Action, Vec<String>>,

    /// Every trigger write seen, including repeats.
    writes: usize,
}

/// A last-write-wins decision made by the builder.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Override {
    /// One trigger bound to several actions in one mode; the last one wins.
    TriggerShadowed {
        mode: String,
        trigger: String,
        actions: Vec<Action>,
    },

    /// One action claimed by several modes for re-entry; the last one wins.
    ReentryTransferred { action: Action, modes: Vec<String> },
}

impl Override {
    /// Whether this override changes what a trigger does
    pub fn is_shadowing(&self) -> bool {
        matches!(self, Override::TriggerShadowed { .. })
    }
}

impl OverrideDetector {
    /// Creates a new empty detector.
    pub fn new() -> Self {
        Self {
            triggers: IndexMap::new(),
            owners: IndexMap::new(),
            writes: 0,
        }
    }

    /// Creates a detector and feeds it every mode in order.
    pub fn from_specs(modes: &[ModeSpec]) -> Self {
        let mut detector = Self::new();
        for mode in modes {
            detector.add_mode(mode);
        }
        detector
    }

    /// Records every trigger write and re-entry claim of `mode`.
    pub fn add_mode(&mut self, mode: &ModeSpec) {
        for entry in &mode.entries {
            for trigger in &entry.triggers {
                self.writes += 1;
                push_distinct(
                    self.triggers
                        .entry((mode.name.clone(), trigger.clone()))
                        .or_default(),
                    &entry.action,
                );
            }

            if !entry.exit_only {
                push_distinct(
                    self.owners.entry(entry.action.clone()).or_default(),
                    &mode.name,
                );
            }
        }
    }

    /// Finds all overrides, shadowed triggers first, each in first-seen order.
    pub fn find_overrides(&self) -> Vec<Override> {
        let shadowed = self
            .triggers
            .iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|((mode, trigger), actions)| Override::TriggerShadowed {
                mode: mode.clone(),
                trigger: trigger.clone(),
                actions: actions.clone(),
            });

        let transferred = self
            .owners
            .iter()
            .filter(|(_, modes)| modes.len() > 1)
            .map(|(action, modes)| Override::ReentryTransferred {
                action: action.clone(),
                modes: modes.clone(),
            });

        shadowed.chain(transferred).collect()
    }

    /// Checks if `trigger` in `mode` was bound to more than one action.
    pub fn has_override(&self, mode: &str, trigger: &str) -> bool {
        self.triggers
            .get(&(mode.to_string(), trigger.to_string()))
            .map(|actions| actions.len() > 1)
            .unwrap_or(false)
    }

    /// Returns the total number of trigger writes tracked.
    pub fn total_bindings(&self) -> usize {
        self.writes
    }
}

impl Default for OverrideDetector {
    fn default() -> Self {
        Self::new()
    }
}

// Keeps the last occurrence last, so the winner is always at the end
fn push_distinct<T: PartialEq + Clone>(list: &mut Vec<T>, value: &T) {
    list.retain(|existing| existing != value);
    list.push(value.clone());
}
