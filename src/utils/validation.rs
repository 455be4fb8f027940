use regex::Regex;
use std::sync::OnceLock;

// Both checks are allow-lists: the values they guard are interpolated into
// git invocations and used as a process working directory, so anything
// outside the permitted alphabet is rejected outright.

fn branch_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_\-\./]+$").expect("branch name pattern compiles")
    })
}

fn directory_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_\-/]+$").expect("directory name pattern compiles")
    })
}

/// Returns true when the branch name contains only letters, digits,
/// underscores, hyphens, dots, and forward slashes.
pub fn is_valid_branch_name(name: &str) -> bool {
    branch_name_pattern().is_match(name)
}

/// Returns true when the directory name contains only letters, digits,
/// underscores, hyphens, and forward slashes.
pub fn is_valid_directory_name(name: &str) -> bool {
    directory_name_pattern().is_match(name)
}
