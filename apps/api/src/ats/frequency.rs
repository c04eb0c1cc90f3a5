//! Frequency-weighted scorer — rewards covering words the JD repeats.

use std::collections::{BTreeSet, HashMap};

use crate::ats::text::normalize_text;

const MIN_IMPORTANT_COUNT: usize = 2;
const MIN_IMPORTANT_CHARS: usize = 3;

/// JD words seen at least twice and longer than three characters.
pub fn important_words(jd_text: &str) -> BTreeSet<String> {
    let normalized = normalize_text(jd_text);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in normalized.split_whitespace() {
        *counts.entry(word).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(word, count)| *count >= MIN_IMPORTANT_COUNT && word.len() > MIN_IMPORTANT_CHARS)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Share of important JD words present in the resume, in `[0, 100]`.
/// Falls back to `fallback` when the JD has no important words.
pub fn frequency_score(resume_text: &str, jd_text: &str, fallback: f64) -> f64 {
    let important = important_words(jd_text);
    if important.is_empty() {
        return fallback;
    }

    let normalized_resume = normalize_text(resume_text);
    let resume_words: BTreeSet<&str> = normalized_resume.split_whitespace().collect();
    let hits = important
        .iter()
        .filter(|w| resume_words.contains(w.as_str()))
        .count();

    100.0 * hits as f64 / important.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_long_words_are_important() {
        let important = important_words("Python Python Python Django");
        assert_eq!(important.len(), 1);
        assert!(important.contains("python"));
    }

    #[test]
    fn test_short_repeated_words_are_ignored() {
        assert!(important_words("go go go sql sql").is_empty());
    }

    #[test]
    fn test_missing_important_word_scores_zero() {
        assert_eq!(frequency_score("Django developer", "Python Python Python Django", 80.0), 0.0);
    }

    #[test]
    fn test_present_important_word_scores_full() {
        assert_eq!(frequency_score("python developer", "Python Python Django", 0.0), 100.0);
    }

    #[test]
    fn test_no_important_words_falls_back() {
        assert_eq!(frequency_score("anything", "Rust engineer", 37.5), 37.5);
        assert_eq!(frequency_score("anything", "", 100.0), 100.0);
    }
}
