//! Axum route handler for resume enhancement.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::categorize::{rank_critical_missing, DEFAULT_CRITICAL_TOP_N};
use crate::ats::verification::{verify_enhancement, EnhancementVerification};
use crate::enhancement::ExpansionQuality;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub enhanced_resume: String,
    pub model: String,
    pub expansion_ratio: f64,
    pub expansion_quality: ExpansionQuality,
    pub verification: EnhancementVerification,
    /// Priority keywords the original resume was missing.
    pub critical_keywords: Vec<String>,
}

/// POST /api/v1/resumes/enhance
///
/// Rewrites the resume toward the JD, then verifies the rewrite against the
/// same scoring engine. A rewrite failure is an error response, never a score.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let outcome = state
        .rewriter
        .rewrite(&request.resume_text, &request.jd_text)
        .await?;

    let verification = verify_enhancement(
        &request.resume_text,
        &outcome.enhanced_resume,
        &request.jd_text,
    );
    info!(
        "Enhancement verified: score {} -> {}, match {:.1}% -> {:.1}%",
        verification.original_score,
        verification.enhanced_score,
        verification.original_match_percentage,
        verification.enhanced_match_percentage
    );

    Ok(Json(EnhanceResponse {
        critical_keywords: rank_critical_missing(
            &request.resume_text,
            &request.jd_text,
            DEFAULT_CRITICAL_TOP_N,
        ),
        enhanced_resume: outcome.enhanced_resume,
        model: outcome.model,
        expansion_ratio: outcome.expansion_ratio,
        expansion_quality: outcome.expansion_quality,
        verification,
    }))
}
