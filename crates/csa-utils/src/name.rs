//! Project name validation and deployment name generation.

/// Names taken by the platform itself.
pub const RESERVED_NAMES: [&str; 2] = ["shuttle", "shuttleapp"];

const PROFANITIES: &str = include_str!("profanities.txt");

/// The outcome of validating a project name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub problems: Vec<String>,
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Checks a project name against every naming rule.
///
/// All violated rules are reported, not just the first one.
///
/// # Examples
/// ```
/// use csa_utils::validate;
///
/// assert!(validate("my-app").is_valid());
/// assert!(!validate("-bad-").is_valid());
/// ```
#[must_use]
pub fn validate(name: &str) -> Validation {
    let mut problems = Vec::new();
    let lowercase = name.to_ascii_lowercase();

    if name.is_empty() {
        problems.push("must not be empty".to_string());
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        problems.push("must contain only alphanumeric characters or -".to_string());
    }

    if profanities().any(|word| lowercase.contains(word)) {
        problems.push("must not contain profanities".to_string());
    }

    if RESERVED_NAMES.contains(&lowercase.as_str()) {
        problems.push(format!("\"{name}\" is a reserved name"));
    }

    if name.starts_with('-') || name.ends_with('-') {
        problems.push("must not start or end with a hyphen".to_string());
    }

    Validation { problems }
}

fn profanities() -> impl Iterator<Item = &'static str> {
    PROFANITIES
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Appends a random 6 hex digit suffix, e.g. `my-app-3fa04c`.
#[must_use]
pub fn unique_name(name: &str) -> String {
    let suffix: String = (0..3).map(|_| format!("{:02x}", fastrand::u8(..))).collect();
    format!("{name}-{suffix}")
}
