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

//! src/core/mod.rs
//!
//! Core table construction
//!
//! This module contains the data structures and algorithms that turn
//! mode specifications into dispatch tables:
//! - Type definitions for modes, entries and the built tables
//! - The single-pass table builder
//! - Structural validation (all-or-nothing)
//! - Override detection for last-write-wins decisions
//! - Mode file parsing
//!
//! Nothing here performs I/O. Loading files lives in `config`.

pub mod builder;
pub mod conflict;
pub mod parser;
pub mod types;
pub mod validator;

pub use builder::build;
pub use conflict::{Override, OverrideDetector};
pub use types::*;
pub use validator::{validate_mode_specs, BuildError};

#[cfg(test)]
mod tests;
