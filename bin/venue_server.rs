//! # Venue Server
//!
//! HTTP service exposing live DEX venues, a fallback venue table and swap-cost estimates.
//!
//! ## Usage
//!
//! ```bash
//! ETH_SEPOLIA_RPC_URL=https://... cargo run --bin venue_server
//! cargo run --bin venue_server -- --fallback-only --port 4000
//! ```
//!
//! Without an RPC URL the server answers from the fallback table only. Press Ctrl+C to stop.

use anyhow::{Context, Result};
use clap::Parser;
use ethers::prelude::{Address, Http, Provider};
use log::{info, warn};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::signal;

use venue_service::{
    adapters::{sushiswap::SushiSwapAdapter, uniswap_v3::UniswapV3Adapter},
    dex_adapter::DexAdapter,
    fetcher::VenueFetcher,
    metrics,
    service::VenueService,
    settings::Settings,
    webserver::{self, AppState},
};

#[derive(Parser)]
#[command(name = "venue_server")]
#[command(about = "DEX venue and swap estimate service", long_about = None)]
struct Args {
    /// Config file (defaults to ./Config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen host, overrides config and HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides config and PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Serve the fallback table even when an RPC URL is configured
    #[arg(long)]
    fallback_only: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => {
            let mut s = Settings::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            s.apply_env_overrides(|key| std::env::var(key).ok());
            s
        }
        None => Settings::new().context("Failed to load settings")?,
    };
    if let Some(host) = &args.host {
        settings.server.host = host.clone();
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    Ok(settings)
}

fn build_service(settings: &Settings, fallback_only: bool) -> Result<VenueService> {
    let url = match settings.rpc.url() {
        Some(url) if !fallback_only => url,
        Some(_) => {
            info!("Fallback-only mode requested, live fetching disabled");
            return Ok(VenueService::fallback_only());
        }
        None => {
            warn!("No ETH_SEPOLIA_RPC_URL or ETH_RPC_URL set, serving fallback venues only");
            return Ok(VenueService::fallback_only());
        }
    };

    let provider = Arc::new(Provider::<Http>::try_from(url).context("Invalid RPC URL")?);
    let contracts = &settings.contracts;

    let uniswap_v3 = UniswapV3Adapter::new(
        Arc::clone(&provider),
        Address::from_str(&contracts.uniswap_v3_factory).context("Invalid Uniswap V3 factory address")?,
        contracts.uniswap_v3_fee_tiers.clone(),
        settings.sizing.clone(),
    );
    let sushiswap = SushiSwapAdapter::new(
        Arc::clone(&provider),
        Address::from_str(&contracts.sushiswap_factory).context("Invalid SushiSwap factory address")?,
        settings.sizing.clone(),
    );
    let adapters: Vec<Arc<dyn DexAdapter>> = vec![Arc::new(uniswap_v3), Arc::new(sushiswap)];

    info!("Live venue fetching enabled ({} adapters)", adapters.len());
    let fetcher = VenueFetcher::new(provider, adapters, settings.rpc.timeout());
    Ok(VenueService::new(Arc::new(fetcher), settings.cache.ttl()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    env_logger::init();

    let args = Args::parse();
    let settings = load_settings(&args)?;
    info!("Settings loaded");

    #[cfg(feature = "observability")]
    {
        let metrics_addr: std::net::SocketAddr = settings
            .observability
            .metrics_listen
            .parse()
            .context("Invalid observability.metrics_listen")?;
        metrics::install_prometheus(metrics_addr)?;
    }
    #[cfg(not(feature = "observability"))]
    metrics::describe_metrics();

    let service = Arc::new(build_service(&settings, args.fallback_only)?);
    info!("Venue service running in {:?} mode", service.mode());
    let state = Arc::new(AppState::new(service, settings.server.service_name.clone()));

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C, serving until killed: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    webserver::start_server(&settings.server.host, settings.server.port, state, shutdown).await
}
