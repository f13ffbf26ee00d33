//! DeFi Advisor HTTP Server
//!
//! Axum-based server exposing the conversational advisor: free-form chat,
//! suggested actions, and transcript retrieval, backed by live Chainlink
//! and Avalanche RPC data with a Gemini language model.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::LanguageModel;
use advisor_data::{AvalancheRpc, ChainlinkFeed, StaticCatalog};
use advisor_engine::ResponseComposer;
use advisor_llm::GeminiClient;

use crate::handlers::{action_handler, chat_handler, health_check, session_handler};
use crate::state::{AppState, SessionRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize the language model
    let model = Arc::new(GeminiClient::from_env());
    if model.health_check().await {
        tracing::info!("✓ Gemini configured ({})", model.name());
    } else {
        tracing::warn!("⚠ GEMINI_API_KEY not set - replies fall back to canned text");
    }
    let model_name = model.name().to_string();

    // Data sources against the Avalanche mainnet public RPC
    let composer = Arc::new(ResponseComposer::new(
        Arc::new(ChainlinkFeed::avalanche_mainnet()),
        Arc::new(StaticCatalog::new()),
        Arc::new(AvalancheRpc::avalanche_mainnet()),
        model,
    ));

    // Build application state
    let state = AppState {
        composer,
        sessions: Arc::new(SessionRegistry::new()),
        model_name,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/action", post(action_handler))
        .route("/api/session/{id}", get(session_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 advisor-server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  POST /api/chat          - Free-form chat");
    tracing::info!("  POST /api/chat/action   - Suggested action");
    tracing::info!("  GET  /api/session/{{id}}  - Session transcript");

    axum::serve(listener, app).await?;

    Ok(())
}
