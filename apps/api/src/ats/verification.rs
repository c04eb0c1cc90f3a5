//! Enhancement verification — compares how well the original and rewritten
//! resumes cover the JD, reusing the scoring and ranking engine.

use serde::{Deserialize, Serialize};

use crate::ats::aggregate::score;
use crate::ats::categorize::{rank_critical_missing, DEFAULT_CRITICAL_TOP_N};
use crate::ats::synonyms::normalized_set;
use crate::ats::terms::{extract_ngram_terms, TermSet, DEFAULT_MIN_UNIGRAM_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationQuality {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl VerificationQuality {
    fn from_match_percentage(pct: f64) -> Self {
        if pct >= 75.0 {
            VerificationQuality::Excellent
        } else if pct >= 60.0 {
            VerificationQuality::Good
        } else if pct >= 45.0 {
            VerificationQuality::Moderate
        } else {
            VerificationQuality::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancementVerification {
    pub jd_total_terms: usize,
    pub original_matches: usize,
    pub enhanced_matches: usize,
    pub original_match_percentage: f64,
    pub enhanced_match_percentage: f64,
    /// Enhanced minus original matched-term count; negative on regression.
    pub improvement: i64,
    /// Percentage-point change in match percentage.
    pub improvement_percentage: f64,
    pub original_length: usize,
    pub enhanced_length: usize,
    pub expansion_percentage: f64,
    pub quality: VerificationQuality,
    pub original_score: u32,
    pub enhanced_score: u32,
    pub remaining_critical: Vec<String>,
}

fn normalized_terms(text: &str) -> TermSet {
    normalized_set(&extract_ngram_terms(text, DEFAULT_MIN_UNIGRAM_LENGTH))
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn verify_enhancement(original: &str, enhanced: &str, jd_text: &str) -> EnhancementVerification {
    let jd = normalized_terms(jd_text);
    let original_matches = normalized_terms(original).intersection(&jd).count();
    let enhanced_matches = normalized_terms(enhanced).intersection(&jd).count();

    let original_match_percentage = percentage(original_matches, jd.len());
    let enhanced_match_percentage = percentage(enhanced_matches, jd.len());

    let original_length = original.chars().count();
    let enhanced_length = enhanced.chars().count();

    EnhancementVerification {
        jd_total_terms: jd.len(),
        original_matches,
        enhanced_matches,
        original_match_percentage,
        enhanced_match_percentage,
        improvement: enhanced_matches as i64 - original_matches as i64,
        improvement_percentage: enhanced_match_percentage - original_match_percentage,
        original_length,
        enhanced_length,
        expansion_percentage: percentage(enhanced_length, original_length),
        quality: VerificationQuality::from_match_percentage(enhanced_match_percentage),
        original_score: score(original, jd_text).score,
        enhanced_score: score(enhanced, jd_text).score,
        remaining_critical: rank_critical_missing(enhanced, jd_text, DEFAULT_CRITICAL_TOP_N),
    }
}
