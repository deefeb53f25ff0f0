//! Tag-content tokenization
//!
//! Splits the text between `{%` and `%}` into arguments: whitespace-separated
//! tokens, where a token may be wrapped in single or double quotes to carry
//! interior whitespace. Quotes are stripped from the returned values.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one argument: a double-quoted token, a single-quoted token, or a
/// bare run of non-whitespace
static ARGUMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|'([^']*)'|(\S+)"#).unwrap());

/// Split tag contents into arguments, honoring quoted tokens
pub fn split_tag_contents(contents: &str) -> Vec<String> {
    ARGUMENT_PATTERN
        .captures_iter(contents)
        .map(|cap| {
            cap.get(1)
                .or_else(|| cap.get(2))
                .or_else(|| cap.get(3))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
        .collect()
}
