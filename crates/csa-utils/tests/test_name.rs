//! Tests for project name validation.

use csa_utils::validate;

#[test]
fn test_valid_names() {
    for name in ["my-app", "app2", "A-b-C", "x"] {
        let validation = validate(name);
        assert!(validation.is_valid(), "{name}: {:?}", validation.problems);
    }
}

#[test]
fn test_hyphen_boundaries() {
    let validation = validate("-bad-");
    assert!(!validation.is_valid());
    assert_eq!(validation.problems, vec!["must not start or end with a hyphen"]);

    assert!(!validate("trailing-").is_valid());
}

#[test]
fn test_reserved_names() {
    assert_eq!(validate("shuttle").problems, vec!["\"shuttle\" is a reserved name"]);
    assert!(!validate("shuttleapp").is_valid());
    assert!(!validate("Shuttle").is_valid());
    assert!(validate("shuttle-app").is_valid());
}

#[test]
fn test_profane_substring() {
    let validation = validate("my-shitty-app");
    assert_eq!(validation.problems, vec!["must not contain profanities"]);
}

#[test]
fn test_invalid_characters() {
    let validation = validate("my_app");
    assert_eq!(
        validation.problems,
        vec!["must contain only alphanumeric characters or -"]
    );
    assert!(!validate("my app").is_valid());
    assert!(!validate("../escape").is_valid());
}

#[test]
fn test_all_problems_are_collected() {
    let validation = validate("-sh!t-");
    assert_eq!(validation.problems.len(), 2);

    let validation = validate("_fuck-");
    assert_eq!(validation.problems.len(), 3);
}

#[test]
fn test_empty_name() {
    assert_eq!(validate("").problems, vec!["must not be empty"]);
}
