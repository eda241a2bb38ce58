//! Inquest API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use inquest_api::config::Config;
use inquest_api::state::AppState;
use inquest_core::clock::SystemClock;
use inquest_core::rng::StdNoiseRng;
use inquest_dialogue::build_generator;
use inquest_mystery::FileMysteryLoader;
use inquest_session::{GameEngine, TracingEventSink};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Inquest API server");

    let config = Config::from_env()?;

    let generator = build_generator(&config.provider, config.llm_timeout)?;
    if let Err(err) = generator.is_available().await {
        // The provider may come up later; asks fail with 502 until it does.
        tracing::warn!(error = %err, "text-generation provider unavailable at startup");
    }

    let loader = Arc::new(FileMysteryLoader::new(config.mystery_dir.clone()));
    let engine = Arc::new(GameEngine::new(
        loader,
        generator,
        Box::new(StdNoiseRng),
        Arc::new(TracingEventSink),
        Arc::new(SystemClock),
        config.engine_config(),
    ));
    engine.spawn_sweeper();

    let app = inquest_api::app(AppState::new(engine));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
