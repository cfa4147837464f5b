use regex::Regex;
use std::sync::OnceLock;

use crate::config::Config;

fn branch_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/-]").expect("static regex is valid"))
}

/// Removes the first occurrence of `prefix` from a version tag.
///
/// The match is not anchored: a prefix found in the middle of the tag is removed
/// if it is the first occurrence. Tag matching already requires the tag to start
/// with the prefix, so this only differs for unusual names.
///
/// # Example
/// ```
/// use gitversion::version::strip_first_prefix_occurrence;
/// assert_eq!(strip_first_prefix_occurrence("v1.2.3", "v"), "1.2.3");
/// assert_eq!(strip_first_prefix_occurrence("av1.0", "v"), "a1.0");
/// ```
pub fn strip_first_prefix_occurrence(tag: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return tag.to_string();
    }
    tag.replacen(prefix, "", 1)
}

/// Turns a branch name into a version: `/` and `-` become `_`, then the
/// configured postfix is appended.
///
/// # Example
/// ```
/// use gitversion::{config::Config, version::format_branch_version};
/// assert_eq!(
///     format_branch_version("feature/foo", &Config::default()),
///     "feature_foo-SNAPSHOT"
/// );
/// ```
pub fn format_branch_version(name: &str, config: &Config) -> String {
    let version_safe_name = branch_separator_regex().replace_all(name, "_");
    format!(
        "{}{}",
        version_safe_name, config.version_from_branch_name_postfix
    )
}
