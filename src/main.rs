//! Hourly ETH momentum session bot entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use polymarket_edge::api::{create_router, AppState};
use polymarket_edge::config::Config;
use polymarket_edge::market::{MarketQuoteReader, PolymarketClient};
use polymarket_edge::metrics;
use polymarket_edge::session::{SessionController, SessionParams};
use polymarket_edge::signal::estimator::estimate_from_candles;
use polymarket_edge::signal::{PriceFeed, SignalEstimator};
use polymarket_edge::signing::address_from_private_key;
use polymarket_edge::trading::OrderExecutor;
use polymarket_edge::utils::shutdown_signal;

/// Hourly ETH momentum session bot.
#[derive(Parser, Debug)]
#[command(name = "polymarket-edge")]
#[command(about = "Hourly momentum session bot for Polymarket UP markets")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Run in dry-run mode (no real orders).
    #[arg(long)]
    dry_run: Option<bool>,

    /// HTTP server port for health/metrics.
    #[arg(short, long, default_value = "8080")]
    port: u16,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one fixed-duration trading session (default).
    Run {
        /// Run in dry-run mode (no real orders).
        #[arg(long)]
        dry_run: Option<bool>,

        /// HTTP server port for health/metrics.
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Check wallet balance and connection.
    CheckBalance,

    /// Fetch the candle window and print the probability estimate.
    Estimate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("polymarket_edge=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::CheckBalance) => cmd_check_balance().await,
        Some(Command::Estimate) => cmd_estimate().await,
        Some(Command::Run { dry_run, port }) => cmd_run(dry_run, port).await,
        None => cmd_run(args.dry_run, args.port).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("POLYMARKET EDGE - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Check private key
    print!("Checking private key... ");
    match address_from_private_key(&config.polymarket_private_key) {
        Ok(addr) => {
            println!("OK");
            println!("  Wallet address: {}", addr);
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Private key invalid"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!(
        "  Signature Type: {} ({})",
        config.polymarket_signature_type,
        match config.polymarket_signature_type {
            0 => "EOA - Standard wallet",
            1 => "Magic.link - Proxy wallet",
            2 => "Gnosis Safe - Multi-sig",
            _ => "Unknown",
        }
    );

    if config.is_magic_link() {
        match &config.polymarket_funder {
            Some(funder) => println!("  Funder Address: {}", funder),
            None => println!("  WARNING: Magic.link requires POLYMARKET_FUNDER to be set!"),
        }
    }

    println!("  UP Token: {}", config.up_token_id);
    println!("  Spend Ceiling: ${}", config.spend_ceiling);
    println!("  Order Size: ${}", config.order_size);
    println!("  Edge Threshold: {} points", config.edge_threshold);
    println!("  Poll Interval: {}s", config.poll_interval_secs);
    println!("  Session Duration: {}s", config.session_duration_secs);
    println!(
        "  Feed: {} {} x{}",
        config.feed_symbol, config.feed_interval, config.feed_lookback
    );
    println!("  Dry Run: {}", config.dry_run);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Check wallet balance and connection.
async fn cmd_check_balance() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("POLYMARKET EDGE - BALANCE CHECK");
    println!("======================================================================");

    // Load configuration
    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("Host: {}", config.polymarket_clob_url);
    println!("Signature Type: {}", config.polymarket_signature_type);
    println!("Private Key: present");
    println!("======================================================================");

    // Create client
    print!("\n1. Creating client... ");
    let client = PolymarketClient::new(&config)?;
    println!("OK");

    // Get wallet address
    print!("\n2. Getting wallet address... ");
    let address = client.address();
    println!("OK");
    println!("   Address: {}", address);

    // Get balance
    print!("\n3. Getting USDC balance... ");
    match client.get_balance().await {
        Ok(balance) => {
            println!("OK");
            println!("   USDC Balance: ${}", balance);
        }
        Err(e) => {
            println!("FAILED");
            println!("   Error: {}", e);
        }
    }

    println!("\n======================================================================");
    println!("BALANCE CHECK COMPLETED");
    println!("======================================================================");

    Ok(())
}

/// Fetch the candle window and print the probability estimate.
async fn cmd_estimate() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("POLYMARKET EDGE - SIGNAL ESTIMATE");
    println!("======================================================================");

    let config = Config::load()?;
    let feed = PriceFeed::new(&config);

    println!(
        "Feed: {} {} x{}",
        config.feed_symbol, config.feed_interval, config.feed_lookback
    );

    print!("\nFetching candle window... ");
    let candles = feed.recent_candles().await?;
    println!("OK ({} candles)", candles.len());

    if let (Some(first), Some(last)) = (candles.first(), candles.last()) {
        println!("  Window open:  {}", first.open);
        println!("  Window close: {}", last.close);
    }

    let estimate = estimate_from_candles(&candles);
    println!("\nEstimated UP probability: {}%", estimate);
    println!("======================================================================");

    Ok(())
}

/// Run one fixed-duration trading session.
async fn cmd_run(dry_run_override: Option<bool>, port: u16) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(dry_run) = dry_run_override {
        config.dry_run = dry_run;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!(
        "Mode: {}",
        if config.dry_run { "SIMULATION" } else { "LIVE TRADING" }
    );
    info!("Instrument: {}", config.up_token_id);
    info!("Order size: ${}", config.order_size);
    info!("Spend ceiling: ${}", config.spend_ceiling);
    info!("Edge threshold: {} points", config.edge_threshold);

    // Initialize metrics
    metrics::init_metrics();
    let prometheus = PrometheusBuilder::new().install_recorder()?;

    // Create app state
    let app_state = AppState::new().with_metrics(prometheus);

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state.clone());

    // Spawn HTTP server
    let _server_handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    // Create venue client and session components
    let client = PolymarketClient::new(&config)?;
    info!("Wallet address: {}", client.address());

    let estimator = SignalEstimator::new(PriceFeed::new(&config));
    let quotes = MarketQuoteReader::new(client.clone());
    let executor = OrderExecutor::new(client, config.dry_run);

    let params = SessionParams::from_config(&config);

    *app_state.instrument.write().await = Some(config.up_token_id.clone());
    app_state.set_ready(true);

    // Run exactly one session, then exit
    let controller = SessionController::new(params, estimator, quotes, executor)
        .with_shared_stats(app_state.stats.clone());

    let summary = controller.run().await;

    app_state.set_ready(false);
    info!("Session finished, total spent: ${}", summary.total_spent);

    Ok(())
}
