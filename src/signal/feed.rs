//! Binance klines client for recent price history.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::FeedError;

/// One OHLC candle from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candle {
    /// Open time in milliseconds since the epoch.
    pub open_time_ms: i64,
    /// Opening price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
}

impl Candle {
    /// Parse one kline row.
    ///
    /// Binance returns each candle as a mixed-type array:
    /// `[openTime, "open", "high", "low", "close", "volume", closeTime, ...]`
    /// with prices encoded as strings.
    pub fn from_row(row: &[Value]) -> Option<Self> {
        let open_time_ms = row.first()?.as_i64()?;
        let parse_price = |index: usize| -> Option<Decimal> {
            row.get(index)?.as_str()?.parse().ok()
        };

        Some(Self {
            open_time_ms,
            open: parse_price(1)?,
            high: parse_price(2)?,
            low: parse_price(3)?,
            close: parse_price(4)?,
        })
    }
}

/// HTTP client for the candle feed.
#[derive(Debug, Clone)]
pub struct PriceFeed {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Feed API base URL.
    base_url: String,
    /// Symbol to fetch (e.g., ETHUSDT).
    symbol: String,
    /// Candle interval (e.g., 1m).
    interval: String,
    /// Number of most-recent candles to request.
    lookback: u32,
}

impl PriceFeed {
    /// Create a new feed client from config.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(std::time::Duration::from_millis(500))
            .tcp_nodelay(true)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            base_url: config.feed_url.clone(),
            symbol: config.feed_symbol.clone(),
            interval: config.feed_interval.clone(),
            lookback: config.feed_lookback,
        }
    }

    /// Get the configured symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Fetch the most recent candle window, oldest first.
    ///
    /// Malformed rows are skipped rather than failing the whole window.
    #[instrument(skip(self), fields(symbol = %self.symbol))]
    pub async fn recent_candles(&self) -> Result<Vec<Candle>, FeedError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let limit = self.lookback.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("symbol", self.symbol.as_str()),
                ("interval", self.interval.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::FetchFailed {
                symbol: self.symbol.clone(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let rows: Vec<Vec<Value>> = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(format!("failed to parse klines: {}", e)))?;

        let total = rows.len();
        let candles: Vec<Candle> = rows.iter().filter_map(|row| Candle::from_row(row)).collect();

        if candles.len() < total {
            warn!(
                skipped = total - candles.len(),
                total, "Skipped malformed kline rows"
            );
        }

        debug!(count = candles.len(), "Fetched candle window");

        Ok(candles)
    }
}
