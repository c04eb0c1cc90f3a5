//! Score aggregator — blends match, similarity and frequency signals into a
//! bounded 0–100 score and derives the ranked missing-term list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ats::frequency::frequency_score;
use crate::ats::matching::match_percentage;
use crate::ats::similarity::similarity_score;
use crate::ats::synonyms::{canonical, normalized_set};
use crate::ats::terms::{extract_terms, TermSet, DEFAULT_MIN_UNIGRAM_LENGTH};

pub const MATCH_WEIGHT: f64 = 0.50;
pub const SIMILARITY_WEIGHT: f64 = 0.30;
pub const FREQUENCY_WEIGHT: f64 = 0.20;

/// Blended scores below this are considered under-measured and boosted.
pub const BOOST_THRESHOLD: f64 = 60.0;
pub const BOOST: f64 = 45.0;

pub const MAX_MISSING_TERMS: usize = 40;

/// Final score plus the JD terms the resume lacks (longest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub missing_terms: Vec<String>,
}

/// Individual signals behind a [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub match_percentage: f64,
    pub similarity_score: f64,
    pub frequency_score: f64,
    pub blended: f64,
}

/// Coarse interpretation of a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    NeedsWork,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 75 {
            ScoreBand::Excellent
        } else if score >= 60 {
            ScoreBand::Good
        } else if score >= 45 {
            ScoreBand::Average
        } else {
            ScoreBand::NeedsWork
        }
    }
}

/// Score a rewrite should aim for: at least 75, otherwise 15 above current.
pub fn target_score(score: u32) -> u32 {
    (score + 15).clamp(75, 100)
}

pub fn blend(match_pct: f64, similarity: f64, frequency: f64) -> f64 {
    MATCH_WEIGHT * match_pct + SIMILARITY_WEIGHT * similarity + FREQUENCY_WEIGHT * frequency
}

/// Applies the normalization boost, clamps to `[0, 100]` and truncates.
pub fn finalize_score(blended: f64) -> u32 {
    let boosted = if blended < BOOST_THRESHOLD {
        blended + BOOST
    } else {
        blended
    };
    boosted.clamp(0.0, 100.0) as u32
}

/// JD terms whose canonical form is absent from the resume, longest first
/// (ties in lexicographic order), capped at [`MAX_MISSING_TERMS`].
pub fn missing_terms(resume_terms: &TermSet, jd_terms: &TermSet) -> Vec<String> {
    let resume_normalized = normalized_set(resume_terms);
    let jd_normalized = normalized_set(jd_terms);
    let missing_normalized: TermSet = jd_normalized
        .difference(&resume_normalized)
        .cloned()
        .collect();

    let mut missing: Vec<String> = jd_terms
        .iter()
        .filter(|term| missing_normalized.contains(&canonical(term)))
        .cloned()
        .collect();

    // jd_terms iterates in lexicographic order and the sort is stable
    missing.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    missing.truncate(MAX_MISSING_TERMS);
    missing
}

/// Scores a resume against a JD, returning the result and its signals.
pub fn score_with_breakdown(resume_text: &str, jd_text: &str) -> (MatchResult, ScoreBreakdown) {
    let resume_terms = extract_terms(resume_text, DEFAULT_MIN_UNIGRAM_LENGTH);
    let jd_terms = extract_terms(jd_text, DEFAULT_MIN_UNIGRAM_LENGTH);

    let match_pct = match_percentage(&resume_terms, &jd_terms, resume_text);
    let similarity = similarity_score(resume_text, jd_text, match_pct);
    let frequency = frequency_score(resume_text, jd_text, match_pct);
    let blended = blend(match_pct, similarity, frequency);
    let score = finalize_score(blended);

    debug!(
        "ATS score {score}: match={match_pct:.1} similarity={similarity:.1} frequency={frequency:.1} blended={blended:.1}"
    );

    (
        MatchResult {
            score,
            missing_terms: missing_terms(&resume_terms, &jd_terms),
        },
        ScoreBreakdown {
            match_percentage: match_pct,
            similarity_score: similarity,
            frequency_score: frequency,
            blended,
        },
    )
}

pub fn score(resume_text: &str, jd_text: &str) -> MatchResult {
    score_with_breakdown(resume_text, jd_text).0
}
