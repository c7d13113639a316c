//! X1 Sentinel API Server
//!
//! Usage:
//!   cargo run --bin sentinel_api
//!
//! Environment (a `.env` file is loaded when present):
//!   PORT             - Server port (default: 4010)
//!   HOST             - Server host (default: 0.0.0.0)
//!   RPC_URL          - Chain JSON-RPC endpoint; empty means demo mode
//!   CONTRACT_ADDRESS - Safety registry address; empty means demo mode
//!   CACHE_TTL_SECS   - Evaluation cache TTL (default: 300)
//!   RUST_LOG         - Log filter (default: info)

use address_sentinel::api::{create_router, AppState};
use address_sentinel::{AppConfig, EvaluationCache, Evaluator, ReportSource};
use address_sentinel::utils::constants::{APP_NAME, APP_VERSION, DEFAULT_CACHE_MAX_ENTRIES};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env();
    let source = ReportSource::from_config(&config)?;

    let cache = EvaluationCache::with_limits(config.cache_ttl, DEFAULT_CACHE_MAX_ENTRIES);
    let cleanup = cache.spawn_cleanup_task();
    info!("🧹 Background cache cleanup task started");

    let evaluator = Evaluator::new(source, cache.clone());
    let mode = evaluator.mode();
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = Arc::new(AppState::new(evaluator, config));
    let app = create_router(state);

    info!("🚀 {} v{} listening on http://{}", APP_NAME, APP_VERSION, addr);
    info!("   Mode: {}", mode.as_str());
    info!("Endpoints:");
    info!("  GET  /api/check/:address        - Address risk + privacy evaluation");
    info!("  GET  /api/reports               - Newest-first report list");
    info!("  GET  /api/reports/:id           - Single report");
    info!("  POST /api/reports               - Prepare submitReport intent");
    info!("  POST /api/reports/:id/vote      - Prepare voteOnReport intent");
    info!("  POST /api/reports/:id/resolve   - Prepare resolveReport intent");
    info!("  GET  /api/config                - Chain info");
    info!("  GET  /health                    - Health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 Shutdown signal received, cleaning up...");
    cleanup.abort();

    let stats = cache.stats();
    info!(
        entries = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        "📊 Final cache stats (hit rate {:.1}%)",
        stats.hit_rate
    );
    info!("👋 {} shutdown complete", APP_NAME);

    Ok(())
}
