//! Keyword categorizer and critical-keyword ranker — presentation helpers for
//! missing terms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ats::synonyms::normalized_set;
use crate::ats::terms::{extract_ngram_terms, DEFAULT_MIN_UNIGRAM_LENGTH};

pub const DEFAULT_CRITICAL_TOP_N: usize = 15;

/// Keyword bucket. Declaration order is the matching priority and the map
/// order of [`categorize`] output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeywordCategory {
    #[serde(rename = "Technical Skills")]
    Technical,
    #[serde(rename = "Soft Skills")]
    SoftSkill,
    #[serde(rename = "Tools & Platforms")]
    ToolPlatform,
    #[serde(rename = "Other")]
    Other,
}

const TECHNICAL_INDICATORS: &[&str] = &[
    "python", "java", "ai", "ml", "cloud", "database", "react", "node", "api", "tensorflow",
];

const SOFT_INDICATORS: &[&str] = &["communication", "leadership", "teamwork", "management"];

const TOOL_INDICATORS: &[&str] = &["github", "docker", "aws", "jira", "jenkins", "git"];

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 4] = [
        KeywordCategory::Technical,
        KeywordCategory::SoftSkill,
        KeywordCategory::ToolPlatform,
        KeywordCategory::Other,
    ];

    /// First bucket whose indicators occur as a substring of the term.
    pub fn classify(term: &str) -> Self {
        let term = term.to_lowercase();
        let hit = |indicators: &[&str]| indicators.iter().any(|i| term.contains(i));

        if hit(TECHNICAL_INDICATORS) {
            KeywordCategory::Technical
        } else if hit(SOFT_INDICATORS) {
            KeywordCategory::SoftSkill
        } else if hit(TOOL_INDICATORS) {
            KeywordCategory::ToolPlatform
        } else {
            KeywordCategory::Other
        }
    }
}

/// Partitions `terms` into the four buckets. Every input lands in exactly one
/// bucket, in input order; all four buckets are always present.
pub fn categorize<S: AsRef<str>>(terms: &[S]) -> BTreeMap<KeywordCategory, Vec<String>> {
    let mut buckets: BTreeMap<KeywordCategory, Vec<String>> = KeywordCategory::ALL
        .iter()
        .map(|c| (*c, Vec::new()))
        .collect();

    for term in terms {
        let term = term.as_ref();
        buckets
            .entry(KeywordCategory::classify(term))
            .or_default()
            .push(term.to_string());
    }
    buckets
}

/// Importance of a missing term: its occurrences in the JD plus a length
/// bonus of one point per ten characters.
fn importance(term: &str, jd_lower: &str) -> f64 {
    let occurrences = jd_lower.matches(&term.to_lowercase()).count();
    occurrences as f64 + term.chars().count() as f64 / 10.0
}

/// Missing normalized n-gram terms ranked by importance, at most `top_n`.
/// Equal scores keep lexicographic order.
pub fn rank_critical_missing(resume_text: &str, jd_text: &str, top_n: usize) -> Vec<String> {
    let jd_normalized = normalized_set(&extract_ngram_terms(jd_text, DEFAULT_MIN_UNIGRAM_LENGTH));
    let resume_normalized =
        normalized_set(&extract_ngram_terms(resume_text, DEFAULT_MIN_UNIGRAM_LENGTH));

    let jd_lower = jd_text.to_lowercase();
    let mut scored: Vec<(&String, f64)> = jd_normalized
        .difference(&resume_normalized)
        .map(|term| (term, importance(term, &jd_lower)))
        .collect();

    // difference() yields lexicographic order; the stable sort keeps it on ties
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(top_n)
        .map(|(term, _)| term.clone())
        .collect()
}
