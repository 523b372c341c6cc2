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

//! Mode Tables
//!
//! Compiles a static list of transient "repeat mode" descriptions into
//! linked dispatch tables. Each table is a mode entered after invoking
//! certain actions; actions may chain from one table into another.
//!
//! # Features
//!
//! - **Dispatch tables:** One trigger → action table per mode
//! - **Re-entry index:** Each action re-enters at most one mode
//! - **Chaining by order:** Later modes take over actions from earlier ones
//! - **All-or-nothing builds:** Invalid input never yields partial tables
//! - **Override report:** Shows every last-write-wins decision
//!
//! # Architecture
//!
//! - **`core`:** Pure table construction (types, builder, validation, parser)
//! - **`config`:** Loading mode files from disk
//!
//! How a host consults the tables, shows an active mode, or times out
//! of one is left to the host.
//!
//! # Examples
//!
//! ## Building tables
//!
//! ```
//! use mode_tables::{build, Action, EntrySpec, ModeSpec};
//!
//! let modes = vec![
//!     ModeSpec::new("yank-only", vec![
//!         EntrySpec::new("yank", ["a"]),
//!         EntrySpec::new("yank_pop", ["b"]).exit_only(),
//!     ]),
//!     ModeSpec::new("yank-popping", vec![EntrySpec::new("yank_pop", ["b", "c"])]),
//! ];
//!
//! let tables = build(&modes)?;
//! assert_eq!(tables.lookup("yank-only", "b"), Some(&Action::new("yank_pop")));
//! assert_eq!(tables.reentry_mode(&Action::new("yank_pop")), Some("yank-popping"));
//! # Ok::<(), mode_tables::BuildError>(())
//! ```
//!
//! ## Finding overrides
//!
//! ```no_run
//! use mode_tables::core::OverrideDetector;
//! # use mode_tables::config::load_mode_specs;
//!
//! # let modes = load_mode_specs("modes.conf")?;
//! let detector = OverrideDetector::from_specs(&modes);
//! for found in detector.find_overrides() {
//!     println!("{:?}", found);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;

// Re-export commonly used types for convenience
pub use crate::core::{build, Action, BuildError, DispatchTable, EntrySpec, ModeSpec, ModeTables, ReentryIndex};
