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

//! src/core/parser.rs
//!
//! Mode file parser
//!
//! This module parses mode files into `ModeSpec`s. It handles:
//! - Mode headers (`mode = NAME`)
//! - Entry lines (`bind = ACTION, TRIGGER, ...` and `exit = ...`)
//! - Variable substitution (`$prefix = C-x`)
//! - Comments and whitespace
//! - Line numbers for error reporting
//!
//! # Format
//! ```text
//! $pop = M-y
//!
//! mode = yank-only
//! bind = yank, C-y
//! exit = yank_pop, $pop
//!
//! mode = yank-popping
//! bind = yank_pop, $pop, y
//! ```
//!
//! # Architecture
//! The parser uses nom combinators for each line in a single pass.
//! Variables are resolved where they are defined, so a value may use
//! earlier variables and a reference before its definition is an
//! `UndefinedVariable` error.
//!
//! The parser only structures data. Empty mode names, empty modes and
//! duplicate names are left for the builder to reject.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
};
use nom::{
    character::complete::{char, space0},
    combinator::{all_consuming, map},
    multi::separated_list1,
};
use nom::{IResult, Parser};
use std::collections::HashMap;
use thiserror::Error;

use crate::core::types::{Action, EntrySpec, ModeSpec};

/// Parse errors with line number context
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("Entry on line {line} appears before any 'mode =' line")]
    EntryOutsideMode { line: usize },

    #[error("Undefined variable '${variable}' on line {line}")]
    UndefinedVariable { variable: String, line: usize },
}

/// A single meaningful line of a mode file
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    /// `mode = NAME`
    Mode(String),
    /// `bind = ...` or `exit = ...`
    Entry(EntrySpec),
}

/// Parse a complete mode file
///
/// # Returns
/// Every mode in file order, or the first ParseError
///
/// # Example
/// ```ignore
/// let content = std::fs::read_to_string("modes.conf")?;
/// let modes = parse_mode_file(&content)?;
/// let tables = build(&modes)?;
/// ```
pub fn parse_mode_file(content: &str) -> Result<Vec<ModeSpec>, ParseError> {
    let mut variables: HashMap<String, String> = HashMap::new();
    let mut modes: Vec<ModeSpec> = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        if line_trimmed.starts_with('$') {
            let (name, raw) = match parse_variable_definition(line_trimmed) {
                Ok((_, definition)) => definition,
                Err(e) => {
                    return Err(ParseError::InvalidSyntax {
                        line: line_num,
                        message: format!("{:?}", e),
                    });
                }
            };

            // Values only see definitions above them
            let value = substitute_variables(raw, &variables, line_num)?;
            variables.insert(name.to_string(), value);
            continue;
        }

        let substituted = substitute_variables(line_trimmed, &variables, line_num)?;

        match parse_line(&substituted) {
            Ok((_, Line::Mode(name))) => modes.push(ModeSpec::new(name, Vec::new())),
            Ok((_, Line::Entry(entry))) => match modes.last_mut() {
                Some(mode) => mode.entries.push(entry),
                None => return Err(ParseError::EntryOutsideMode { line: line_num }),
            },
            Err(e) => {
                return Err(ParseError::InvalidSyntax {
                    line: line_num,
                    message: format!("{:?}", e),
                });
            }
        }
    }

    Ok(modes)
}

/// Parse a variable definition
///
/// Format: `$name = value`. The name must be non-empty; the value is the
/// trimmed remainder of the line and is returned unsubstituted.
pub fn parse_variable_definition(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = char('$').parse(input)?;
    let (input, name) = take_while1(is_name_char).parse(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;

    Ok(("", (name, input.trim())))
}

/// Substitute `$name` references in a line
///
/// A `$` followed by a name that was never defined is an error. A lone
/// `$` (not followed by a name character) is kept as-is.
pub fn substitute_variables(
    line: &str,
    variables: &HashMap<String, String>,
    line_num: usize,
) -> Result<String, ParseError> {
    let mut result = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after
            .find(|c: char| !is_name_char(c))
            .unwrap_or(after.len());

        if name_len == 0 {
            result.push('$');
            rest = after;
            continue;
        }

        let name = &after[..name_len];
        match variables.get(name) {
            Some(value) => result.push_str(value),
            None => {
                return Err(ParseError::UndefinedVariable {
                    variable: name.to_string(),
                    line: line_num,
                })
            }
        }
        rest = &after[name_len..];
    }

    result.push_str(rest);
    Ok(result)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse one non-comment line
///
/// Formats:
/// - `mode = NAME`
/// - `bind = ACTION, TRIGGER[, TRIGGER...]`
/// - `exit = ACTION, TRIGGER[, TRIGGER...]`
pub fn parse_line(input: &str) -> IResult<&str, Line> {
    alt((
        map(parse_mode_header, Line::Mode),
        map(parse_entry, Line::Entry),
    ))
    .parse(input)
}

/// Parse `mode = NAME`
///
/// The name is the trimmed remainder of the line and may be empty.
pub fn parse_mode_header(input: &str) -> IResult<&str, String> {
    let (input, _) = (tag("mode"), space0, char('='), space0).parse(input)?;

    Ok(("", input.trim().to_string()))
}

/// Parse the entry keyword, returning whether the entry is exit-only
pub fn parse_entry_kind(input: &str) -> IResult<&str, bool> {
    alt((
        map(tag("bind"), |_: &str| false),
        map(tag("exit"), |_: &str| true),
    ))
    .parse(input)
}

/// Parse `bind = ...` or `exit = ...`
pub fn parse_entry(input: &str) -> IResult<&str, EntrySpec> {
    let (input, exit_only) = parse_entry_kind(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;
    let (input, action) = parse_action(input)?;
    let (input, _) = (space0, char(','), space0).parse(input)?;
    let (input, triggers) = all_consuming(parse_triggers).parse(input)?;

    Ok((
        input,
        EntrySpec {
            action,
            triggers,
            exit_only,
        },
    ))
}

/// Parse an action identifier
///
/// Actions are opaque: the trimmed, non-empty text up to the first comma.
pub fn parse_action(input: &str) -> IResult<&str, Action> {
    let (rest, raw) = take_while1(|c: char| c != ',').parse(input)?;
    let action = raw.trim();

    if action.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    Ok((rest, Action::new(action)))
}

/// Parse a comma-separated trigger list
///
/// Triggers are trimmed; inner spaces are kept (`C-x o` is one trigger).
pub fn parse_triggers(input: &str) -> IResult<&str, Vec<String>> {
    let (input, triggers) = separated_list1(
        char(','),
        map(take_while1(|c: char| c != ','), |s: &str| s.trim()),
    )
    .parse(input)?;

    if triggers.iter().any(|t| t.is_empty()) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    Ok((input, triggers.into_iter().map(str::to_string).collect()))
}
