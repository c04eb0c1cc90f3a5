mod ats;
mod config;
mod enhancement;
mod errors;
mod ingest;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enhancement::{DisabledRewriter, FallbackRewriter, ResumeRewriter};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize resume rewriter (Gemini with model fallback, or disabled without a key)
    let rewriter: Arc<dyn ResumeRewriter> = match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(key.clone())?;
            info!("Resume rewriter enabled (models: {})", config.gemini_models.join(", "));
            Arc::new(FallbackRewriter::new(client, config.gemini_models.clone()))
        }
        None => {
            warn!("GEMINI_API_KEY not set; /api/v1/resumes/enhance will return 503");
            Arc::new(DisabledRewriter)
        }
    };

    let state = AppState {
        config: config.clone(),
        rewriter,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
