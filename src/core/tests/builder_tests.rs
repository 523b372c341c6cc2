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

//! Builder tests
//!
//! Covers the ordering guarantees of table construction:
//! - Last-write-wins on triggers within a mode
//! - Single-owner re-entry across modes
//! - Exit-only entries never owning re-entry
//! - Mode chaining through processing order
//! - All-or-nothing failure

use crate::core::{build, Action, BuildError, EntrySpec, ModeSpec};
use std::thread;

/// Helper for the yank / yank-pop chain
fn yank_modes() -> Vec<ModeSpec> {
    vec![
        ModeSpec::new(
            "yank-only",
            vec![
                EntrySpec::new("yank", ["a"]),
                EntrySpec::new("yank_pop", ["b"]).exit_only(),
            ],
        ),
        ModeSpec::new("yank-popping", vec![EntrySpec::new("yank_pop", ["b", "c"])]),
    ]
}

fn action(id: &str) -> Action {
    Action::new(id)
}

#[test]
fn test_chaining_scenario() {
    let tables = build(&yank_modes()).unwrap();

    let yank_only = tables.table("yank-only").unwrap();
    assert_eq!(yank_only.len(), 2);
    assert_eq!(yank_only.get("a"), Some(&action("yank")));
    assert_eq!(yank_only.get("b"), Some(&action("yank_pop")));

    let popping = tables.table("yank-popping").unwrap();
    assert_eq!(popping.len(), 2);
    assert_eq!(popping.get("b"), Some(&action("yank_pop")));
    assert_eq!(popping.get("c"), Some(&action("yank_pop")));

    let reentry = tables.reentry();
    assert_eq!(reentry.len(), 2);
    assert_eq!(reentry.mode_for(&action("yank")), Some("yank-only"));
    assert_eq!(reentry.mode_for(&action("yank_pop")), Some("yank-popping"));
}

#[test]
fn test_build_is_deterministic() {
    let modes = yank_modes();

    let first = build(&modes).unwrap();
    let second = build(&modes).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_last_write_wins_on_triggers() {
    let modes = vec![ModeSpec::new(
        "nav",
        vec![
            EntrySpec::new("next", ["n"]),
            EntrySpec::new("down", ["n", "j"]),
        ],
    )];

    let tables = build(&modes).unwrap();
    let nav = tables.table("nav").unwrap();

    assert_eq!(nav.len(), 2);
    assert_eq!(nav.get("n"), Some(&action("down")));

    // "next" lost its only trigger but still owns re-entry
    assert_eq!(tables.reentry_mode(&action("next")), Some("nav"));
}

#[test]
fn test_duplicate_trigger_within_one_entry() {
    let modes = vec![ModeSpec::new("nav", vec![EntrySpec::new("next", ["n", "n"])])];

    let tables = build(&modes).unwrap();
    assert_eq!(tables.table("nav").unwrap().len(), 1);
}

#[test]
fn test_single_owner_reentry() {
    let modes = vec![
        ModeSpec::new("a", vec![EntrySpec::new("x", ["1"])]),
        ModeSpec::new("b", vec![EntrySpec::new("x", ["2"])]),
    ];

    let tables = build(&modes).unwrap();
    assert_eq!(tables.reentry_mode(&action("x")), Some("b"));

    // Still reachable from both tables
    assert_eq!(tables.lookup("a", "1"), Some(&action("x")));
    assert_eq!(tables.lookup("b", "2"), Some(&action("x")));
}

#[test]
fn test_reentry_within_one_mode_uses_last_entry() {
    let modes = vec![
        ModeSpec::new("a", vec![EntrySpec::new("x", ["1"])]),
        ModeSpec::new(
            "b",
            vec![EntrySpec::new("x", ["2"]), EntrySpec::new("x", ["3"])],
        ),
    ];

    let tables = build(&modes).unwrap();
    assert_eq!(tables.reentry_mode(&action("x")), Some("b"));
    assert_eq!(tables.reentry().len(), 1);
}

#[test]
fn test_exit_only_never_registers() {
    let modes = vec![ModeSpec::new(
        "nav",
        vec![
            EntrySpec::new("next", ["n"]),
            EntrySpec::new("quit", ["q"]).exit_only(),
        ],
    )];

    let tables = build(&modes).unwrap();
    assert_eq!(tables.lookup("nav", "q"), Some(&action("quit")));
    assert!(!tables.reentry().contains(&action("quit")));
}

#[test]
fn test_exit_only_does_not_steal_reentry() {
    let modes = vec![
        ModeSpec::new("a", vec![EntrySpec::new("x", ["1"])]),
        ModeSpec::new("b", vec![EntrySpec::new("x", ["2"]).exit_only()]),
    ];

    let tables = build(&modes).unwrap();
    assert_eq!(tables.reentry_mode(&action("x")), Some("a"));
}

#[test]
fn test_actions_entering_mode() {
    let modes = vec![ModeSpec::new(
        "window",
        vec![
            EntrySpec::new("enlarge", ["^"]),
            EntrySpec::new("shrink", ["v"]),
            EntrySpec::new("balance", ["="]).exit_only(),
        ],
    )];

    let tables = build(&modes).unwrap();
    let entering: Vec<&Action> = tables.reentry().actions_entering("window").collect();
    assert_eq!(entering, vec![&action("enlarge"), &action("shrink")]);
}

#[test]
fn test_tables_follow_input_order() {
    let modes = vec![
        ModeSpec::new("zeta", vec![EntrySpec::new("z", ["z"])]),
        ModeSpec::new("alpha", vec![EntrySpec::new("a", ["a"])]),
    ];

    let tables = build(&modes).unwrap();
    let names: Vec<&str> = tables.mode_names().collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn test_empty_entry_list_builds_nothing() {
    let modes = vec![
        ModeSpec::new("nav", vec![EntrySpec::new("next", ["n"])]),
        ModeSpec::new("empty", Vec::new()),
    ];

    assert_eq!(
        build(&modes),
        Err(BuildError::EmptyEntryList {
            mode: "empty".to_string()
        })
    );
}

#[test]
fn test_duplicate_mode_name() {
    let modes = vec![
        ModeSpec::new("nav", vec![EntrySpec::new("next", ["n"])]),
        ModeSpec::new("nav", vec![EntrySpec::new("prev", ["p"])]),
    ];

    assert_eq!(
        build(&modes),
        Err(BuildError::DuplicateModeName {
            name: "nav".to_string()
        })
    );
}

#[test]
fn test_first_failure_is_reported() {
    let modes = vec![
        ModeSpec::new("nav", vec![EntrySpec::new("next", Vec::<String>::new())]),
        ModeSpec::new("", vec![EntrySpec::new("prev", ["p"])]),
    ];

    assert!(matches!(
        build(&modes),
        Err(BuildError::EmptyTriggerList { .. })
    ));
}

#[test]
fn test_output_is_shareable_across_threads() {
    let tables = build(&yank_modes()).unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(tables.lookup("yank-popping", "c"), Some(&action("yank_pop")));
            });
        }
    });
}

#[test]
fn test_into_parts() {
    let (tables, reentry) = build(&yank_modes()).unwrap().into_parts();

    assert_eq!(tables.len(), 2);
    assert_eq!(tables["yank-only"].mode_name(), "yank-only");
    assert_eq!(reentry.len(), 2);
}
