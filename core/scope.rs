use std::path::{MAIN_SEPARATOR_STR, is_separator};

pub const DEFAULT_INCLUDE_PATHS: &[&str] = &["src"];

pub fn default_include_paths() -> Vec<String> {
    DEFAULT_INCLUDE_PATHS.iter().map(|p| p.to_string()).collect()
}

/// Collapses runs of separators and drops leading/trailing ones. `.` and `..`
/// segments are kept as literal text.
fn normalize(path: &str) -> String {
    path.split(is_separator)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(MAIN_SEPARATOR_STR)
}

/// True when `relative_path` is one of `include_paths` or lies beneath one of them.
/// Matching is literal and case-sensitive.
pub fn is_included<S: AsRef<str>>(relative_path: &str, include_paths: &[S]) -> bool {
    let relative = normalize(relative_path);
    include_paths.iter().any(|prefix| {
        let prefix = normalize(prefix.as_ref());
        if prefix.is_empty() {
            return false;
        }
        relative == prefix
            || relative
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with(MAIN_SEPARATOR_STR))
    })
}
