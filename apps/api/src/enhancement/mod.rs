//! Resume enhancement — pluggable, trait-based rewrite of a resume toward a JD.
//!
//! Default: `FallbackRewriter<GeminiClient>`, which walks an ordered list of
//! models once. `DisabledRewriter` stands in when no API key is configured.
//!
//! `AppState` holds an `Arc<dyn ResumeRewriter>`, chosen at startup via config.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::enhancement::prompts::build_rewrite_prompt;
use crate::llm_client::{classify, ErrorClass, TextGenerator};

/// Rewrites shorter than this are treated as failed generations.
const MIN_OUTPUT_CHARS: usize = 100;
/// A rewrite must keep at least this fraction of the original length.
const MIN_LENGTH_RATIO: f64 = 0.8;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One model that was tried and why it was not used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAttempt {
    pub model: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("resume enhancement is not configured")]
    NotConfigured,

    #[error("API key rejected by {model}; check GEMINI_API_KEY")]
    InvalidApiKey { model: String },

    #[error("all {} model(s) failed: {}", .attempts.len(), summarize(.attempts))]
    Exhausted { attempts: Vec<ModelAttempt> },
}

fn summarize(attempts: &[ModelAttempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("{} ({})", a.model, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// How much longer the rewrite is than the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionQuality {
    Excellent,
    Good,
    Moderate,
}

impl ExpansionQuality {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 1.4 {
            ExpansionQuality::Excellent
        } else if ratio >= 1.2 {
            ExpansionQuality::Good
        } else {
            ExpansionQuality::Moderate
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteOutcome {
    pub enhanced_resume: String,
    pub model: String,
    pub expansion_ratio: f64,
    pub expansion_quality: ExpansionQuality,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap rewrite backends without touching the handler.
#[async_trait]
pub trait ResumeRewriter: Send + Sync {
    async fn rewrite(&self, resume_text: &str, jd_text: &str)
        -> Result<RewriteOutcome, RewriteError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Used when no API key is present. Scoring keeps working; rewrites fail fast.
pub struct DisabledRewriter;

#[async_trait]
impl ResumeRewriter for DisabledRewriter {
    async fn rewrite(
        &self,
        _resume_text: &str,
        _jd_text: &str,
    ) -> Result<RewriteOutcome, RewriteError> {
        Err(RewriteError::NotConfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackRewriter
// ────────────────────────────────────────────────────────────────────────────

/// Tries each model in order, once. Quota, not-found and unusable output move
/// on to the next model; a rejected API key stops immediately.
pub struct FallbackRewriter<G> {
    generator: G,
    models: Vec<String>,
}

impl<G: TextGenerator> FallbackRewriter<G> {
    pub fn new(generator: G, models: Vec<String>) -> Self {
        Self { generator, models }
    }
}

/// Rejects output that is too short to be a resume or shrank the original.
fn check_output(original: &str, enhanced: &str) -> Result<(), String> {
    let enhanced_len = enhanced.chars().count();
    let original_len = original.chars().count();

    if enhanced_len < MIN_OUTPUT_CHARS {
        return Err(format!("output too short ({enhanced_len} chars)"));
    }
    if (enhanced_len as f64) < original_len as f64 * MIN_LENGTH_RATIO {
        return Err(format!(
            "insufficient enhancement ({enhanced_len} vs {original_len} chars)"
        ));
    }
    Ok(())
}

fn expansion_ratio(original: &str, enhanced: &str) -> f64 {
    let original_len = original.chars().count();
    if original_len == 0 {
        return 0.0;
    }
    enhanced.chars().count() as f64 / original_len as f64
}

#[async_trait]
impl<G: TextGenerator> ResumeRewriter for FallbackRewriter<G> {
    async fn rewrite(
        &self,
        resume_text: &str,
        jd_text: &str,
    ) -> Result<RewriteOutcome, RewriteError> {
        let prompt = build_rewrite_prompt(resume_text, jd_text);
        let mut attempts = Vec::new();

        for model in &self.models {
            info!("Trying model {model}");

            let reason = match self.generator.generate(model, &prompt).await {
                Ok(text) => {
                    let enhanced = text.trim();
                    match check_output(resume_text, enhanced) {
                        Ok(()) => {
                            let ratio = expansion_ratio(resume_text, enhanced);
                            info!(
                                "Enhanced with {model}: {} -> {} chars ({:.0}%)",
                                resume_text.chars().count(),
                                enhanced.chars().count(),
                                ratio * 100.0
                            );
                            return Ok(RewriteOutcome {
                                enhanced_resume: enhanced.to_string(),
                                model: model.clone(),
                                expansion_ratio: ratio,
                                expansion_quality: ExpansionQuality::from_ratio(ratio),
                            });
                        }
                        Err(reason) => reason,
                    }
                }
                Err(e) => match classify(&e) {
                    ErrorClass::InvalidApiKey => {
                        warn!("{model} rejected the API key: {e}");
                        return Err(RewriteError::InvalidApiKey {
                            model: model.clone(),
                        });
                    }
                    ErrorClass::Quota => format!("quota exceeded: {e}"),
                    ErrorClass::ModelNotFound => format!("model not available: {e}"),
                    ErrorClass::Transient | ErrorClass::Other => e.to_string(),
                },
            };

            warn!("{model} failed: {reason}");
            attempts.push(ModelAttempt {
                model: model.clone(),
                reason,
            });
        }

        Err(RewriteError::Exhausted { attempts })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
