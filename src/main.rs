//! Service entry point.
//!
//! Loads configuration, wires the Gemini-backed resilient generator and the
//! Tavily search provider into the HTTP router, and serves it.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use varshan_ai::adapters::ai::{GeminiBackend, GeminiConfig, KeyPool, ResilientGenerator};
use varshan_ai::adapters::http::{routes, AppState};
use varshan_ai::adapters::search::{TavilyConfig, TavilySearchProvider};
use varshan_ai::application::flows::FlowModels;
use varshan_ai::config::AppConfig;
use varshan_ai::ports::{Generator, SearchProvider};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("varshan-ai failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level);
    config.validate()?;

    if !config.ai.has_any_key() {
        warn!(
            "No Gemini API keys found. Please set GEMINI_API_KEY in your .env file; \
             generation requests will fail until one is configured."
        );
    }
    if !config.search.has_key() {
        warn!("No Tavily API key found; the web search tool will be unavailable.");
    }

    let backend = GeminiBackend::new(
        GeminiConfig::new()
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    );
    let pool = KeyPool::new(config.ai.api_keys());
    info!(keys = pool.len(), "credential pool ready");
    let generator: Arc<dyn Generator> = Arc::new(ResilientGenerator::new(backend, pool));

    let search: Arc<dyn SearchProvider> = Arc::new(TavilySearchProvider::new(
        TavilyConfig::new(config.search.tavily_api_key.clone())
            .with_base_url(config.search.base_url.clone())
            .with_search_depth(config.search.search_depth.clone())
            .with_max_results(config.search.max_results)
            .with_timeout(config.search.timeout()),
    ));

    let models = FlowModels {
        chat: config.ai.chat_model.clone(),
        image: config.ai.image_model.clone(),
    };
    let state = AppState::new(generator, search, models);

    let mut app = axum::Router::new()
        .nest("/api", routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    if !config.is_production() {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, environment = ?config.server.environment, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
