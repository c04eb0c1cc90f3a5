use std::sync::Arc;

use crate::config::Config;
use crate::enhancement::ResumeRewriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable rewriter. `FallbackRewriter<GeminiClient>` when GEMINI_API_KEY is set,
    /// otherwise `DisabledRewriter`.
    pub rewriter: Arc<dyn ResumeRewriter>,
}
