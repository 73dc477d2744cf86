use anyhow::Result;
use clap::{Parser, Subcommand};
use rankboard_core::{AppConfig, BoardCache, ColorStore, ConfigLoader, Tracker};
use rankboard_marketplace::{MarketplaceClient, MarketplaceConfig};
use rankboard_render::SvgBadgeRenderer;
use rankboard_web_api::ApiServer;
use std::num::NonZeroU32;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "rankboard")]
#[command(
    about = "Tracks the top NFT collections by 24h volume and serves rank-badge metadata",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tracker loop together with the metadata API
    Run {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
    /// Run a single update cycle and exit
    Once {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => run_service(&config).await?,
        Commands::Once { config } => run_once(&config).await?,
    }

    Ok(())
}

fn build_tracker(
    config: &AppConfig,
    cache: BoardCache,
) -> Result<Tracker<MarketplaceClient, SvgBadgeRenderer>> {
    let mut marketplace = MarketplaceConfig::default()
        .with_base_url(config.marketplace.base_url.clone())
        .with_api_key(config.marketplace.api_key.clone())
        .with_page_size(config.marketplace.page_size)
        .with_timeout_secs(config.marketplace.timeout_secs)
        .with_max_retries(config.marketplace.max_retries);
    if let Some(rpm) = NonZeroU32::new(config.marketplace.requests_per_minute) {
        marketplace = marketplace.with_rate_limit(rpm);
    }

    let source = MarketplaceClient::new(marketplace)?;
    let renderer = SvgBadgeRenderer::new(config.tracker.images_dir.clone());
    let reference = config
        .tracker
        .reference_mode
        .provider(&config.tracker.data_dir);
    let colors = ColorStore::new(config.tracker.data_dir.join("colors.json"));

    Ok(Tracker::new(source, renderer, reference, colors, cache)
        .with_top_n(config.tracker.top_n)
        .with_cycle_timeout(Duration::from_secs(config.tracker.cycle_timeout_secs)))
}

async fn run_service(config_path: &str) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let cache = BoardCache::new();

    let mut tracker = build_tracker(&config, cache.clone())?;
    let interval = Duration::from_secs(config.tracker.interval_secs);

    let server = ApiServer::new(
        cache,
        config.server.public_base_url.clone(),
        config.tracker.images_dir.clone(),
    );
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let server_task = tokio::spawn(async move { server.serve(&addr).await });

    tokio::select! {
        result = tracker.run(interval) => result?,
        result = server_task => result??,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT (Ctrl+C), shutting down");
        }
    }

    Ok(())
}

async fn run_once(config_path: &str) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let mut tracker = build_tracker(&config, BoardCache::new())?;

    let count = tracker.run_cycle().await?;
    tracing::info!(collections = count, "Cycle complete");

    Ok(())
}
