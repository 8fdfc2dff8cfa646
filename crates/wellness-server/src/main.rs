mod api;
mod config;
mod error;
mod redis_client;
mod server;
mod store;

use std::path::Path;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wellness_core::{ConcernScorer, PhraseTable, ResourceCatalog};

use config::Config;
use error::AppError;
use redis_client::RedisClient;
use server::WellnessServer;
use store::DashboardStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting wellness MCP server");

    let config = Config::from_env()?;
    info!(
        redis = config.redis_url.is_some(),
        resources = ?config.resources_path,
        phrase_table = ?config.phrase_table_path,
        session_ttl_secs = config.session_ttl_secs,
        "configuration loaded"
    );

    let catalog = match &config.resources_path {
        Some(path) => ResourceCatalog::from_json(&read_file(path)?)?,
        None => ResourceCatalog::builtin(),
    };
    if catalog.is_empty() {
        warn!("resource catalog is empty, filter_resources will return nothing");
    }
    info!(
        resources = catalog.len(),
        categories = catalog.categories().len(),
        "resource catalog loaded"
    );

    let table = match &config.phrase_table_path {
        Some(path) => PhraseTable::from_json(&read_file(path)?)?,
        None => PhraseTable::default(),
    };
    info!(
        tiers = table.tiers.len(),
        phrases = table.phrase_count(),
        "phrase table loaded"
    );

    let redis = RedisClient::new(config.redis_url.as_deref());
    if redis.is_available().await {
        info!("redis connected");
    } else if redis.is_configured() {
        info!("redis unreachable, session state will not persist until it recovers");
    }
    let store = DashboardStore::new(redis, config.session_ttl_secs);
    info!(backend = store.backend_name(), "session store ready");

    let server = WellnessServer::new(catalog, ConcernScorer::new(table), store);

    if let Some(addr) = &config.tcp_listen_addr {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.display().to_string(),
        source,
    })
}
