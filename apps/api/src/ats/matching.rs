//! Coverage & match calculator.

use serde::{Deserialize, Serialize};

use crate::ats::synonyms::{canonical, normalized_set};
use crate::ats::terms::{extract_ngram_terms, TermSet, DEFAULT_MIN_UNIGRAM_LENGTH};

const COVERED_SAMPLE_LIMIT: usize = 20;
const MISSING_SAMPLE_LIMIT: usize = 40;

/// Coverage of the JD's normalized n-gram terms by the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub total_terms: usize,
    pub covered_count: usize,
    pub missing_count: usize,
    pub coverage_percentage: f64,
    pub covered_terms: Vec<String>, // first 20, lexicographic
    pub missing_terms: Vec<String>, // first 40, lexicographic
}

/// Case-insensitive substring match of a term anywhere in free text.
fn fuzzy_match(term: &str, text_lower: &str) -> bool {
    text_lower.contains(&term.to_lowercase())
}

/// Percentage of JD terms found in the resume.
///
/// A JD term matches when its canonical form is in the resume's normalized
/// set, its lowercase form is in the raw resume set, or its canonical form
/// occurs anywhere in the raw resume text. An empty JD set is a vacuous
/// full match (100.0).
pub fn match_percentage(resume_terms: &TermSet, jd_terms: &TermSet, resume_text: &str) -> f64 {
    if jd_terms.is_empty() {
        return 100.0;
    }

    let resume_normalized = normalized_set(resume_terms);
    let resume_lower = resume_text.to_lowercase();

    let matched = jd_terms
        .iter()
        .filter(|term| {
            let norm = canonical(term);
            resume_normalized.contains(&norm)
                || resume_terms.contains(&term.to_lowercase())
                || fuzzy_match(&norm, &resume_lower)
        })
        .count();

    100.0 * matched as f64 / jd_terms.len() as f64
}

/// Builds the coverage report from n-gram terms only (no technical patterns).
///
/// An empty JD term set reports 0% coverage. This deliberately differs from
/// [`match_percentage`], which treats the same case as 100%.
pub fn coverage(resume_text: &str, jd_text: &str) -> CoverageReport {
    let jd_normalized = normalized_set(&extract_ngram_terms(jd_text, DEFAULT_MIN_UNIGRAM_LENGTH));
    let resume_normalized =
        normalized_set(&extract_ngram_terms(resume_text, DEFAULT_MIN_UNIGRAM_LENGTH));

    let covered: Vec<&String> = jd_normalized.intersection(&resume_normalized).collect();
    let missing: Vec<&String> = jd_normalized.difference(&resume_normalized).collect();

    let total_terms = jd_normalized.len();
    let coverage_percentage = if total_terms > 0 {
        covered.len() as f64 / total_terms as f64 * 100.0
    } else {
        0.0
    };

    CoverageReport {
        total_terms,
        covered_count: covered.len(),
        missing_count: missing.len(),
        coverage_percentage,
        covered_terms: covered
            .iter()
            .take(COVERED_SAMPLE_LIMIT)
            .map(|t| (*t).clone())
            .collect(),
        missing_terms: missing
            .iter()
            .take(MISSING_SAMPLE_LIMIT)
            .map(|t| (*t).clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> TermSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_jd_terms_is_full_match() {
        assert_eq!(match_percentage(&set(&["rust"]), &TermSet::new(), "rust"), 100.0);
    }

    #[test]
    fn test_exact_match_counts() {
        let pct = match_percentage(&set(&["rust", "tokio"]), &set(&["rust", "kafka"]), "");
        assert!((pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_synonym_match_counts() {
        // JD says "ml", resume only spells it out
        let pct = match_percentage(&set(&["machine learning"]), &set(&["ml"]), "");
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn test_substring_match_against_full_text() {
        let pct = match_percentage(
            &TermSet::new(),
            &set(&["distributed systems"]),
            "Built Distributed Systems at scale",
        );
        assert_eq!(pct, 100.0);
    }

    #[test]
    fn test_no_match_is_zero() {
        let pct = match_percentage(&set(&["java"]), &set(&["haskell"]), "java developer");
        assert_eq!(pct, 0.0);
    }

    #[test]
    fn test_coverage_empty_jd_is_zero_percent() {
        let report = coverage("Rust engineer with tokio", "");
        assert_eq!(report.total_terms, 0);
        assert_eq!(report.coverage_percentage, 0.0);
        assert!(report.covered_terms.is_empty());
    }

    #[test]
    fn test_coverage_counts_add_up() {
        let report = coverage(
            "Senior Rust engineer building distributed systems",
            "Rust engineer for distributed systems and Kafka pipelines",
        );
        assert_eq!(report.covered_count + report.missing_count, report.total_terms);
        assert!(report.covered_terms.contains(&"rust".to_string()));
        assert!(report.missing_terms.contains(&"kafka".to_string()));
        assert!(report.coverage_percentage > 0.0 && report.coverage_percentage < 100.0);
    }

    #[test]
    fn test_coverage_samples_are_capped() {
        let jd = (0..200).map(|i| format!("skill{i}")).collect::<Vec<_>>().join(" ");
        let report = coverage(&jd, &jd);
        assert_eq!(report.covered_terms.len(), 20);
        assert!(report.missing_terms.is_empty());
        assert_eq!(report.coverage_percentage, 100.0);
    }

    #[test]
    fn test_coverage_is_idempotent() {
        let resume = "Python developer, ML pipelines on AWS";
        let jd = "Machine learning engineer: Python, AWS, Docker";
        assert_eq!(coverage(resume, jd), coverage(resume, jd));
    }
}
