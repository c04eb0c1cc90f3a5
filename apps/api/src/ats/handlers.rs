//! Axum route handlers for the ATS scoring API.

use std::collections::BTreeMap;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ats::aggregate::{score_with_breakdown, target_score, ScoreBand, ScoreBreakdown};
use crate::ats::categorize::{categorize, rank_critical_missing, KeywordCategory, DEFAULT_CRITICAL_TOP_N};
use crate::ats::matching::{coverage, CoverageReport};
use crate::ats::sections::{detect_sections, SectionReport};
use crate::errors::AppError;

/// Missing terms shown per category in the analysis view.
const CATEGORIZED_MISSING_LIMIT: usize = 30;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u32,
    pub band: ScoreBand,
    pub target_score: u32,
    pub missing_terms: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub terms: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CriticalKeywordsRequest {
    pub resume_text: String,
    pub jd_text: String,
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CriticalKeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub score: ScoreResponse,
    pub coverage: CoverageReport,
    pub categorized_missing: BTreeMap<KeywordCategory, Vec<String>>,
    pub critical_keywords: Vec<String>,
    pub sections: SectionReport,
}

fn require_resume(resume_text: &str) -> Result<(), AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    Ok(())
}

fn build_score_response(resume_text: &str, jd_text: &str) -> ScoreResponse {
    let (result, breakdown) = score_with_breakdown(resume_text, jd_text);
    ScoreResponse {
        score: result.score,
        band: ScoreBand::from_score(result.score),
        target_score: target_score(result.score),
        missing_terms: result.missing_terms,
        breakdown,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// An empty JD is accepted and scores 100 (nothing to miss).
pub async fn handle_score(
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    require_resume(&request.resume_text)?;
    Ok(Json(build_score_response(&request.resume_text, &request.jd_text)))
}

/// POST /api/v1/ats/coverage
pub async fn handle_coverage(Json(request): Json<ScoreRequest>) -> Json<CoverageReport> {
    Json(coverage(&request.resume_text, &request.jd_text))
}

/// POST /api/v1/ats/categorize
pub async fn handle_categorize(
    Json(request): Json<CategorizeRequest>,
) -> Json<BTreeMap<KeywordCategory, Vec<String>>> {
    Json(categorize(&request.terms))
}

/// POST /api/v1/ats/critical-keywords
pub async fn handle_critical_keywords(
    Json(request): Json<CriticalKeywordsRequest>,
) -> Result<Json<CriticalKeywordsResponse>, AppError> {
    let top_n = request.top_n.unwrap_or(DEFAULT_CRITICAL_TOP_N);
    if top_n == 0 {
        return Err(AppError::Validation("top_n must be at least 1".to_string()));
    }
    Ok(Json(CriticalKeywordsResponse {
        keywords: rank_critical_missing(&request.resume_text, &request.jd_text, top_n),
    }))
}

/// POST /api/v1/ats/analyze
///
/// Full analysis view: score, coverage, categorized missing terms, priority
/// keywords and detected resume sections in one response.
pub async fn handle_analyze(
    Json(request): Json<ScoreRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    require_resume(&request.resume_text)?;

    let score = build_score_response(&request.resume_text, &request.jd_text);
    let shown: Vec<&String> = score
        .missing_terms
        .iter()
        .take(CATEGORIZED_MISSING_LIMIT)
        .collect();
    let categorized_missing = categorize(&shown);

    Ok(Json(AnalyzeResponse {
        coverage: coverage(&request.resume_text, &request.jd_text),
        categorized_missing,
        critical_keywords: rank_critical_missing(
            &request.resume_text,
            &request.jd_text,
            DEFAULT_CRITICAL_TOP_N,
        ),
        sections: detect_sections(&request.resume_text),
        score,
    }))
}
