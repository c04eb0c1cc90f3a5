//! Similarity scorer — TF-IDF cosine between the normalized resume and JD.
//!
//! Features are unigrams and bigrams of `\w\w+` tokens, restricted to the
//! 1500 most frequent across the two-document corpus. IDF is smoothed
//! (`ln((1 + n) / (1 + df)) + 1`) and vectors are L2-normalized, so the dot
//! product is the cosine.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::ats::text::normalize_text;

pub const MAX_FEATURES: usize = 1500;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("empty vocabulary; documents contain no usable tokens")]
    EmptyVocabulary,

    #[error("reference document has no weight in the vocabulary")]
    ZeroReference,
}

type TermCounts = BTreeMap<String, usize>;

fn term_counts(normalized: &str) -> TermCounts {
    let tokens: Vec<&str> = TOKEN.find_iter(normalized).map(|m| m.as_str()).collect();
    let mut counts = TermCounts::new();
    for token in &tokens {
        *counts.entry((*token).to_string()).or_insert(0) += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(pair.join(" ")).or_insert(0) += 1;
    }
    counts
}

/// Picks the `MAX_FEATURES` terms with the highest corpus frequency; ties go
/// to the lexicographically smaller term.
fn select_vocabulary(docs: &[TermCounts]) -> BTreeSet<String> {
    let mut corpus: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in docs {
        for (term, count) in doc {
            *corpus.entry(term.as_str()).or_insert(0) += count;
        }
    }
    let mut ranked: Vec<(&str, usize)> = corpus.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(MAX_FEATURES)
        .map(|(term, _)| term.to_string())
        .collect()
}

/// Cosine similarity in `[0, 1]` between a candidate text and a reference
/// text. A candidate with no weight scores 0; a weightless reference is an
/// error so the caller can fall back.
pub fn tfidf_cosine(first: &str, second: &str) -> Result<f64, SimilarityError> {
    let docs = [
        term_counts(&normalize_text(first)),
        term_counts(&normalize_text(second)),
    ];

    let vocabulary = select_vocabulary(&docs);
    if vocabulary.is_empty() {
        return Err(SimilarityError::EmptyVocabulary);
    }

    let n_docs = docs.len() as f64;
    let idf: BTreeMap<&str, f64> = vocabulary
        .iter()
        .map(|term| {
            let df = docs.iter().filter(|d| d.contains_key(term)).count() as f64;
            (term.as_str(), ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0)
        })
        .collect();

    let mut vectors = Vec::with_capacity(docs.len());
    for (index, doc) in docs.iter().enumerate() {
        let weights: BTreeMap<&str, f64> = doc
            .iter()
            .filter_map(|(term, count)| {
                idf.get(term.as_str())
                    .map(|w| (term.as_str(), *count as f64 * w))
            })
            .collect();
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return if index == 0 {
                Ok(0.0)
            } else {
                Err(SimilarityError::ZeroReference)
            };
        }
        vectors.push(
            weights
                .into_iter()
                .map(|(term, w)| (term, w / norm))
                .collect::<BTreeMap<&str, f64>>(),
        );
    }

    let dot: f64 = vectors[0]
        .iter()
        .filter_map(|(term, w)| vectors[1].get(term).map(|v| w * v))
        .sum();

    Ok(dot.clamp(0.0, 1.0))
}

/// Similarity scaled to `[0, 100]`. Any vectorization failure falls back to
/// `fallback` (the keyword match percentage) instead of failing.
pub fn similarity_score(resume_text: &str, jd_text: &str, fallback: f64) -> f64 {
    match tfidf_cosine(resume_text, jd_text) {
        Ok(similarity) => similarity * 100.0,
        Err(e) => {
            debug!("Similarity unavailable ({e}); using keyword match {fallback:.1}");
            fallback
        }
    }
}
