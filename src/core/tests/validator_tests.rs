use crate::core::types::{EntrySpec, ModeSpec};
use crate::core::validator::*;

fn valid(name: &str) -> ModeSpec {
    ModeSpec::new(name, vec![EntrySpec::new("next", ["n"])])
}

#[test]
fn test_valid_input() {
    assert!(validate_mode_specs(&[valid("nav"), valid("window")]).is_ok());
    assert!(validate_mode_specs(&[]).is_ok());
}

#[test]
fn test_empty_mode_name() {
    assert_eq!(
        validate_mode_specs(&[valid("nav"), valid("")]),
        Err(BuildError::EmptyModeName { index: 1 })
    );
}

#[test]
fn test_duplicate_mode_name() {
    assert_eq!(
        validate_mode_specs(&[valid("nav"), valid("window"), valid("nav")]),
        Err(BuildError::DuplicateModeName {
            name: "nav".to_string()
        })
    );
}

#[test]
fn test_duplicate_checked_before_entries() {
    let modes = [valid("nav"), ModeSpec::new("nav", Vec::new())];
    assert!(matches!(
        validate_mode_specs(&modes),
        Err(BuildError::DuplicateModeName { .. })
    ));
}

#[test]
fn test_empty_entry_list() {
    assert_eq!(
        validate_mode_specs(&[ModeSpec::new("nav", Vec::new())]),
        Err(BuildError::EmptyEntryList {
            mode: "nav".to_string()
        })
    );
}

#[test]
fn test_empty_trigger_list() {
    let mode = ModeSpec::new(
        "nav",
        vec![
            EntrySpec::new("next", ["n"]),
            EntrySpec::new("prev", Vec::<String>::new()),
        ],
    );

    assert_eq!(
        validate_mode_specs(&[mode]),
        Err(BuildError::EmptyTriggerList {
            mode: "nav".to_string(),
            action: "prev".to_string(),
        })
    );
}

#[test]
fn test_actions_are_not_validated() {
    let mode = ModeSpec::new("nav", vec![EntrySpec::new("", ["anything goes; $(rm)"])]);
    assert!(validate_mode_specs(&[mode]).is_ok());
}

#[test]
fn test_first_failure_in_processing_order() {
    let modes = [
        ModeSpec::new("a", Vec::new()),
        ModeSpec::new("", Vec::new()),
    ];
    assert_eq!(
        validate_mode_specs(&modes),
        Err(BuildError::EmptyEntryList {
            mode: "a".to_string()
        })
    );
}

#[test]
fn test_empty_name_reported_before_entries() {
    assert_eq!(
        validate_mode_specs(&[ModeSpec::new("", Vec::new())]),
        Err(BuildError::EmptyModeName { index: 0 })
    );

    // A second empty name never reaches the duplicate check
    assert_eq!(
        validate_mode_specs(&[ModeSpec::new("", Vec::new()), valid("")]),
        Err(BuildError::EmptyModeName { index: 0 })
    );
}
