//! Term extractor — unigrams, bigrams, trigrams and technical-pattern tokens.
//!
//! Term sets are `BTreeSet`s, so iteration is lexicographic and the 300-term
//! cap always keeps the same survivors for the same input.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ats::synonyms::is_stop_word;
use crate::ats::text::normalize_text;

/// Ordered, deduplicated set of extracted terms.
pub type TermSet = BTreeSet<String>;

/// Upper bound on the cardinality of any extracted term set.
pub const MAX_TERMS: usize = 300;

/// Unigrams must be strictly longer than this.
pub const DEFAULT_MIN_UNIGRAM_LENGTH: usize = 2;

const MIN_BIGRAM_CHARS: usize = 5;
const MIN_TRIGRAM_CHARS: usize = 10;

/// Patterns run on raw, case-preserved text.
static TECHNICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // AWS, API, ABC++
        r"\b[A-Z]{2,}\+?\+?\b",
        // python3, es6, k8s
        r"\b\w+\d+\b",
        // Node.js, Vue.js
        r"\b[A-Z][a-z]+(?:\.[a-z]+)+\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid technical pattern"))
    .collect()
});

/// N-gram terms only, capped at [`MAX_TERMS`]. This is the lighter view used
/// by coverage reporting, critical-keyword ranking and verification.
pub fn extract_ngram_terms(text: &str, min_unigram_length: usize) -> TermSet {
    cap(ngrams(&normalize_text(text), min_unigram_length))
}

/// Regex-detected technical tokens, lowercased.
pub fn extract_technical_patterns(text: &str) -> TermSet {
    let mut terms = TermSet::new();
    for pattern in TECHNICAL_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            terms.insert(m.as_str().to_lowercase());
        }
    }
    terms
}

/// N-gram terms united with technical-pattern terms, capped at [`MAX_TERMS`].
pub fn extract_terms(text: &str, min_unigram_length: usize) -> TermSet {
    let mut terms = ngrams(&normalize_text(text), min_unigram_length);
    terms.extend(extract_technical_patterns(text));
    cap(terms)
}

fn ngrams(normalized: &str, min_unigram_length: usize) -> TermSet {
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let mut terms = TermSet::new();

    for word in &words {
        if !is_stop_word(word) && word.len() > min_unigram_length {
            terms.insert((*word).to_string());
        }
    }

    for pair in words.windows(2) {
        let phrase = pair.join(" ");
        if phrase.len() > MIN_BIGRAM_CHARS {
            terms.insert(phrase);
        }
    }

    for triple in words.windows(3) {
        let phrase = triple.join(" ");
        if phrase.len() > MIN_TRIGRAM_CHARS {
            terms.insert(phrase);
        }
    }

    terms
}

/// Keeps the lexicographically smallest [`MAX_TERMS`] entries.
fn cap(terms: TermSet) -> TermSet {
    if terms.len() <= MAX_TERMS {
        return terms;
    }
    terms.into_iter().take(MAX_TERMS).collect()
}
