//! Wildcard name resolution for inventory objects.
//!
//! Supports the `*` (any run) and `?` (any single character) wildcards the
//! platform's own tooling uses. Matching is anchored and case-sensitive.

use regex::Regex;

use crate::domain::error::LookupError;

/// Compile a wildcard pattern into an anchored regex.
///
/// Every character except `*` and `?` is matched literally.
#[must_use]
pub fn wildcard_regex(pattern: &str) -> Regex {
    let mut re = String::with_capacity(pattern.len() + 2);
    re.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    #[allow(clippy::expect_used)] // escaped input cannot produce an invalid regex
    Regex::new(&re).expect("escaped wildcard pattern is a valid regex")
}

/// Resolve a pattern to exactly one name.
///
/// # Errors
///
/// Returns [`LookupError::NoMatch`] if nothing matches and
/// [`LookupError::Ambiguous`] (listing the matches) if more than one does.
pub fn resolve_unique(
    kind: &'static str,
    pattern: &str,
    names: &[String],
) -> Result<String, LookupError> {
    let re = wildcard_regex(pattern);
    let mut matches: Vec<String> = names.iter().filter(|n| re.is_match(n)).cloned().collect();
    match matches.len() {
        0 => Err(LookupError::NoMatch {
            kind,
            pattern: pattern.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(LookupError::Ambiguous {
            kind,
            pattern: pattern.to_string(),
            matches,
        }),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
