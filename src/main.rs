//! Home Strategist - guided home-design dialogue
//!
//! A Rust backend that runs one strategist session: a conversation with a
//! tool-calling model that fills in a requirements brief and renders the
//! home when the client is ready.

mod api;
mod llm;
mod runtime;
mod session;
mod state_machine;
mod system_prompt;
mod tools;

use api::{create_router, AppState};
use llm::{LlmConfig, LoggingSession};
use runtime::{ConversationService, ConversationSession, ImageSynthesizer, SessionHandle, SessionRuntime};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use system_prompt::build_system_prompt;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "home_strategist=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("STRATEGIST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let prompt_path = std::env::var("STRATEGIST_SYSTEM_PROMPT_PATH")
        .ok()
        .map(PathBuf::from);

    let llm_config = LlmConfig::from_env();
    let (chat_service, image_service) = llm_config.connect().inspect_err(|e| {
        tracing::error!(error = %e, "No LLM API key configured. Set GEMINI_API_KEY or LLM_GATEWAY.");
    })?;
    tracing::info!(
        chat_model = %llm_config.chat_model(),
        image_model = %llm_config.image_model(),
        gateway = llm_config.gateway.is_some(),
        "Gemini collaborators initialized"
    );

    // One session for the lifetime of the process
    let system_prompt = build_system_prompt(prompt_path.as_deref());
    let chat_session = chat_service
        .create_session(&system_prompt, &tools::definitions())
        .await?;
    let chat_session: Box<dyn ConversationSession> =
        Box::new(LoggingSession::new(chat_session, llm_config.chat_model()));
    let synthesizer: Arc<dyn ImageSynthesizer> = Arc::new(image_service);
    let session = SessionHandle::new(SessionRuntime::new(chat_session, synthesizer));

    // Create application state
    let state = AppState::new(session);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Home strategist server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
