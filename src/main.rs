//! Likes Gateway
//!
//! Public HTTP endpoint that hides region discovery, token rotation, and
//! multi-account like fan-out behind a single `GET /like?uid=...` call.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use likes_gateway::client::HttpGameClient;
use likes_gateway::config::Config;
use likes_gateway::like::orchestrator::LikeOrchestrator;
use likes_gateway::routes::{self, AppState};
use likes_gateway::tokens::TokenPool;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listen port (overrides LIKES_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Token file path (overrides LIKES_TOKENS_FILE)
    #[arg(long)]
    tokens_file: Option<String>,

    /// Print per-region token counts and exit
    #[arg(long)]
    check_tokens: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .json()
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.tokens_file {
        config.tokens_file = path;
    }

    let pool = TokenPool::load(&config.tokens_file).await;

    if cli.check_tokens {
        for region in &config.regions {
            println!("{}: {} tokens", region.name, pool.count(&region.name).await);
        }
        return Ok(());
    }

    info!("Starting Likes Gateway");

    let http = Client::builder().timeout(config.request_timeout).build()?;
    let client = Arc::new(HttpGameClient::new(http));
    let orchestrator = Arc::new(LikeOrchestrator::new(&config, pool.clone(), client));

    // Pick up rotated token files without a restart
    let reload_pool = pool.clone();
    let reload_path = PathBuf::from(config.tokens_file.clone());
    let reload_every = config.tokens_reload;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(reload_every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = reload_pool.reload(&reload_path).await {
                warn!("Token reload failed: {:#}", e);
            }
        }
    });

    let app = routes::router(AppState { orchestrator });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Likes Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
