//! Term normalizer — folds synonym spellings onto one canonical form.
//!
//! The synonym and stop-word tables are immutable process-wide constants.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;

/// Canonical term → accepted spellings. A spelling may appear under exactly
/// one canonical key (checked in tests and at lookup construction).
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("python", &["python", "python3", "py"]),
    ("machine learning", &["ml", "machine learning"]),
    ("artificial intelligence", &["ai"]),
    ("deep learning", &["dl"]),
    ("natural language processing", &["nlp"]),
    ("react", &["react", "reactjs", "react.js"]),
    ("node", &["node", "nodejs", "node.js"]),
    ("aws", &["aws", "amazon web services"]),
];

/// Words never kept as unigrams.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "be", "been", "have", "has", "had", "do", "does", "did",
    "will", "would", "should", "can", "this", "that", "these", "those", "it", "its", "their",
    "our", "your",
];

/// Variant → canonical lookup. On a duplicated variant the first table entry
/// wins, matching a linear scan of `SYNONYMS`.
static VARIANT_LOOKUP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut lookup = HashMap::new();
    for (canonical, variants) in SYNONYMS {
        for variant in *variants {
            lookup.entry(*variant).or_insert(*canonical);
        }
    }
    lookup
});

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Returns the canonical form of `term` (lowercased and trimmed), or the
/// lowercased term itself when it has no synonym group.
pub fn canonical(term: &str) -> String {
    let term = term.trim().to_lowercase();
    match VARIANT_LOOKUP.get(term.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => term,
    }
}

/// Every term contributes its lowercase form and its canonical form, so both
/// exact and synonym matching succeed downstream.
pub fn normalized_set<'a, I>(terms: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut normalized = BTreeSet::new();
    for term in terms {
        normalized.insert(term.to_lowercase());
        normalized.insert(canonical(term));
    }
    normalized
}
