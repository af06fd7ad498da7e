use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.]+").unwrap());

/// Normalizes a project name for comparison: lowercase, with every run of
/// `-`, `_` and `.` collapsed into a single `-`.
pub fn canonicalize_name(name: impl AsRef<str>) -> String {
    SEPARATOR_RUNS
        .replace_all(name.as_ref(), "-")
        .to_lowercase()
}

/// Whether two project names refer to the same project.
pub fn names_match(a: impl AsRef<str>, b: impl AsRef<str>) -> bool {
    canonicalize_name(a) == canonicalize_name(b)
}
