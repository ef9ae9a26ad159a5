//! Integration tests for the session bot.
//!
//! The ignored tests require network access, and some a valid
//! POLYMARKET_PRIVATE_KEY environment variable.
//! Run with: cargo test --test integration -- --ignored

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

use polymarket_edge::config::Config;
use polymarket_edge::error::BotError;
use polymarket_edge::market::mock::MockVenue;
use polymarket_edge::market::{MarketQuoteReader, PolymarketClient};
use polymarket_edge::session::{ProbabilitySource, SessionController, SessionParams};
use polymarket_edge::signal::estimator::estimate_from_candles;
use polymarket_edge::signal::PriceFeed;
use polymarket_edge::trading::order::Side;
use polymarket_edge::trading::OrderExecutor;

/// A config usable without credentials in the environment.
fn offline_config() -> Config {
    Config {
        polymarket_private_key:
            "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
        polymarket_signature_type: 0,
        polymarket_funder: None,
        chain_id: 137,
        up_token_id: "test-up-token".to_string(),
        spend_ceiling: dec!(20),
        order_size: dec!(5),
        edge_threshold: dec!(10),
        poll_interval_secs: 20,
        session_duration_secs: 3600,
        feed_url: "https://api.binance.com".to_string(),
        feed_symbol: "ETHUSDT".to_string(),
        feed_interval: "1m".to_string(),
        feed_lookback: 60,
        polymarket_clob_url: "https://clob.polymarket.com".to_string(),
        dry_run: true,
        http_timeout_ms: 10_000,
        port: 8080,
        rust_log: "info".to_string(),
        verbose: false,
    }
}

/// Get a test config from environment.
fn env_config() -> Option<Config> {
    dotenvy::dotenv().ok();

    let private_key = std::env::var("POLYMARKET_PRIVATE_KEY").ok()?;

    // Skip if using placeholder key
    if private_key.starts_with("0x1234") || private_key.len() < 64 {
        return None;
    }

    let mut config = offline_config();
    config.polymarket_private_key = private_key;
    config.polymarket_signature_type = std::env::var("POLYMARKET_SIGNATURE_TYPE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    config.polymarket_funder = std::env::var("POLYMARKET_FUNDER").ok();
    Some(config)
}

/// Test that we can derive the wallet address.
#[tokio::test]
#[ignore = "requires POLYMARKET_PRIVATE_KEY"]
async fn test_wallet_address() {
    let config = match env_config() {
        Some(c) => c,
        None => {
            println!("Skipping: POLYMARKET_PRIVATE_KEY not set or invalid");
            return;
        }
    };

    let client = PolymarketClient::new(&config).expect("client creation failed");

    let address = client.address();
    assert!(address.starts_with("0x"), "Invalid address format");
    assert_eq!(address.len(), 42, "Address should be 42 characters");

    println!("Wallet address: {}", address);
}

/// Test that we can query the balance.
#[tokio::test]
#[ignore = "requires POLYMARKET_PRIVATE_KEY"]
async fn test_get_balance() {
    let config = match env_config() {
        Some(c) => c,
        None => {
            println!("Skipping: POLYMARKET_PRIVATE_KEY not set or invalid");
            return;
        }
    };

    let client = PolymarketClient::new(&config).expect("client creation failed");

    let result = client.get_balance().await;
    assert!(result.is_ok(), "Failed to get balance: {:?}", result.err());

    let balance = result.unwrap();
    assert!(balance >= Decimal::ZERO, "Balance should be non-negative");

    println!("USDC Balance: ${}", balance);
}

/// Test that a venue price lookup completes; an unknown token must yield
/// "no price", not an error.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_venue_price() {
    let config = offline_config();
    let client = PolymarketClient::new(&config).expect("client creation failed");
    let reader = MarketQuoteReader::new(client.clone());

    // Not a real token; the call should complete either way
    let result = client.price("0", Side::Buy).await;
    match result {
        Ok(Some(price)) => println!("Price: {}", price),
        Ok(None) => println!("No price for token (expected for unknown token)"),
        Err(e) => println!("Price fetch returned error: {}", e),
    }

    let quote = reader.quote("0").await;
    match quote {
        Ok(Some(percent)) => println!("Quote: {}%", percent),
        Ok(None) => println!("No quote for token"),
        Err(e) => println!("Quote fetch returned error: {}", e),
    }
}

/// Test that the candle feed returns a usable window.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_feed_fetch() {
    let config = offline_config();
    let feed = PriceFeed::new(&config);

    let candles = feed.recent_candles().await.expect("feed fetch failed");
    assert!(!candles.is_empty(), "Expected at least one candle");
    assert!(candles.len() <= 60, "Window larger than requested");

    let estimate = estimate_from_candles(&candles);
    assert!(estimate >= dec!(5) && estimate <= dec!(95));

    println!("Fetched {} candles, estimate: {}%", candles.len(), estimate);
}

/// Test signing module functions.
#[test]
fn test_signing_utilities() {
    use polymarket_client_sdk::clob::types::SignatureType;
    use polymarket_edge::signing::{
        address_from_private_key, create_signer, signature_type_from_u8,
    };

    // Test signature type conversion
    assert!(matches!(signature_type_from_u8(0), SignatureType::Eoa));
    assert!(matches!(signature_type_from_u8(1), SignatureType::Proxy));
    assert!(matches!(signature_type_from_u8(2), SignatureType::GnosisSafe));

    // Test signer creation
    let key = "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
    let signer = create_signer(key);
    assert!(signer.is_ok());

    // Test address derivation
    let address = address_from_private_key(key);
    assert!(address.is_ok());
    let addr = address.unwrap();
    assert!(addr.starts_with("0x"));
    assert_eq!(addr.len(), 42);
}

/// Probability source returning a fixed estimate.
struct FixedSignal(Decimal);

#[async_trait]
impl ProbabilitySource for FixedSignal {
    async fn estimate(&self) -> Result<Decimal, BotError> {
        Ok(self.0)
    }
}

/// End-to-end dry-run session: a real executor in simulation mode against a
/// mocked quote source, driven to the duration boundary.
#[tokio::test(start_paused = true)]
async fn dry_run_session_respects_budget() {
    let config = offline_config();
    let client = PolymarketClient::new(&config).expect("client creation failed");
    let executor = OrderExecutor::new(client, true);

    let venue = MockVenue::with_quote(dec!(55));

    let params = SessionParams {
        token_id: config.up_token_id.clone(),
        order_size: dec!(5),
        spend_ceiling: dec!(20),
        edge_threshold: dec!(10),
        poll_interval: Duration::from_secs(20),
        session_duration: Duration::from_secs(60),
    };

    // estimate 70 vs quote 55: every round trades until the clock runs out
    let controller =
        SessionController::new(params, FixedSignal(dec!(70)), venue.clone(), executor);

    let summary = controller.run().await;

    assert_eq!(summary.stats.iterations, 3);
    assert_eq!(summary.stats.trades_executed, 3);
    assert_eq!(summary.total_spent, dec!(15));
    assert!(summary.total_spent <= dec!(20));
    assert_eq!(summary.stats.iteration_errors, 0);
}
