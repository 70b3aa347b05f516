mod config;
mod errors;
mod flows;
mod identity;
mod inflight;
mod llm_client;
mod models;
mod quiz;
mod recommendations;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::identity::IdentityProvider;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::backend::{MemoryBackend, RedisBackend, SnapshotBackend};
use crate::store::ProfileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathfinder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize snapshot storage
    let backend: Arc<dyn SnapshotBackend> = match (config.store_backend, &config.redis_url) {
        (StoreBackend::Redis, Some(url)) => Arc::new(RedisBackend::connect(url).await?),
        (StoreBackend::Redis, None) => anyhow::bail!("REDIS_URL is required for the redis backend"),
        (StoreBackend::Memory, _) => {
            info!("Using in-memory profile storage; profiles are lost on restart");
            Arc::new(MemoryBackend::default())
        }
    };
    let store = ProfileStore::new(backend, config.storage_namespace.clone());

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState::new(Arc::new(llm), store);

    let _identity_log = state.identity.on_identity_change(Box::new(|change| match change.identity {
        Some(identity) => info!(profile_id = %change.profile_id, user = %identity.display_name, "signed in"),
        None => info!(profile_id = %change.profile_id, "signed out"),
    }));

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
