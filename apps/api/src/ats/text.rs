//! Text normalizer — the single lowercase/punctuation/whitespace pass every
//! downstream stage reads from.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything outside this class is replaced by a space. `+ # . - /` survive so
/// that "c++", "c#", "node.js" and "ci/cd" stay intact.
static NON_SEMANTIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s+#./-]").expect("valid normalizer pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Lowercases, strips non-semantic punctuation and collapses whitespace.
///
/// Empty input yields an empty string.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lowered = text.to_lowercase();
    let stripped = NON_SEMANTIC.replace_all(&lowered, " ");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Display cleanup for extracted resume text: collapses whitespace and drops
/// characters outside `[A-Za-z0-9.,+/# ]`. Case is preserved.
pub fn clean_display_text(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    collapsed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ',' | '+' | '/' | '#' | ' '))
        .collect::<String>()
        .trim()
        .to_string()
}
