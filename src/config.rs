//! Application configuration loaded from environment variables.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Polymarket Credentials ===
    /// Wallet private key (hex, starts with 0x).
    pub polymarket_private_key: String,

    /// Signature type: 0=EOA, 1=Magic.link, 2=Gnosis Safe.
    #[serde(default)]
    pub polymarket_signature_type: u8,

    /// Proxy wallet address (required for Magic.link).
    #[serde(default)]
    pub polymarket_funder: Option<String>,

    /// Chain ID (137 for Polygon mainnet).
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    // === Instrument ===
    /// CLOB token ID of the "UP" outcome to buy.
    pub up_token_id: String,

    // === Trading Parameters ===
    /// Maximum USDC committed over one session.
    #[serde(default = "default_spend_ceiling")]
    pub spend_ceiling: Decimal,

    /// USDC per trade.
    #[serde(default = "default_order_size")]
    pub order_size: Decimal,

    /// Minimum edge in percentage points to trade.
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold: Decimal,

    /// Seconds between evaluation rounds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Session length in seconds.
    #[serde(default = "default_session_duration")]
    pub session_duration_secs: u64,

    // === Price Feed ===
    /// Feed API base URL.
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Feed symbol (e.g., ETHUSDT).
    #[serde(default = "default_feed_symbol")]
    pub feed_symbol: String,

    /// Candle interval (e.g., 1m).
    #[serde(default = "default_feed_interval")]
    pub feed_interval: String,

    /// Number of recent candles to fetch.
    #[serde(default = "default_feed_lookback")]
    pub feed_lookback: u32,

    // === Venue ===
    /// CLOB API base URL.
    #[serde(default = "default_clob_url")]
    pub polymarket_clob_url: String,

    // === Operation Modes ===
    /// Simulation mode (no real orders).
    #[serde(default = "default_true")]
    pub dry_run: bool,

    // === HTTP Client ===
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Server Configuration ===
    /// HTTP server port for health/metrics endpoints.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_chain_id() -> u64 {
    137
}

fn default_spend_ceiling() -> Decimal {
    Decimal::new(20, 0) // 20 USDC
}

fn default_order_size() -> Decimal {
    Decimal::new(5, 0) // 5 USDC
}

fn default_edge_threshold() -> Decimal {
    Decimal::new(10, 0) // 10 percentage points
}

fn default_poll_interval() -> u64 {
    20
}

fn default_session_duration() -> u64 {
    3600
}

fn default_feed_url() -> String {
    "https://api.binance.com".to_string()
}

fn default_feed_symbol() -> String {
    "ETHUSDT".to_string()
}

fn default_feed_interval() -> String {
    "1m".to_string()
}

fn default_feed_lookback() -> u32 {
    60
}

fn default_clob_url() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_true() -> bool {
    true
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    ///
    /// Credential and instrument placeholders are rejected here, before any
    /// session work starts.
    pub fn validate(&self) -> Result<(), String> {
        if self.polymarket_private_key.is_empty() {
            return Err("POLYMARKET_PRIVATE_KEY is required".to_string());
        }

        if !self.polymarket_private_key.starts_with("0x") {
            return Err("POLYMARKET_PRIVATE_KEY must start with 0x".to_string());
        }

        if self.polymarket_private_key.contains("YOUR_") {
            return Err("POLYMARKET_PRIVATE_KEY is still a placeholder".to_string());
        }

        if let Some(funder) = &self.polymarket_funder {
            if funder.contains("YOUR_") {
                return Err("POLYMARKET_FUNDER is still a placeholder".to_string());
            }
        }

        if self.is_magic_link() && self.polymarket_funder.is_none() {
            return Err("POLYMARKET_FUNDER is required for Magic.link wallets".to_string());
        }

        if self.up_token_id.is_empty() || self.up_token_id.starts_with("REPLACE_") {
            return Err("UP_TOKEN_ID must be set to a real CLOB token ID".to_string());
        }

        if self.order_size <= Decimal::ZERO {
            return Err("ORDER_SIZE must be positive".to_string());
        }

        if self.spend_ceiling <= Decimal::ZERO {
            return Err("SPEND_CEILING must be positive".to_string());
        }

        if self.poll_interval_secs == 0 {
            return Err("POLL_INTERVAL_SECS must be positive".to_string());
        }

        if self.session_duration_secs == 0 {
            return Err("SESSION_DURATION_SECS must be positive".to_string());
        }

        if self.feed_lookback == 0 {
            return Err("FEED_LOOKBACK must be positive".to_string());
        }

        Ok(())
    }

    /// Check if using Magic.link (signature_type == 1).
    pub fn is_magic_link(&self) -> bool {
        self.polymarket_signature_type == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            polymarket_private_key:
                "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
            polymarket_signature_type: 0,
            polymarket_funder: None,
            chain_id: default_chain_id(),
            up_token_id: "test-up-token".to_string(),
            spend_ceiling: default_spend_ceiling(),
            order_size: default_order_size(),
            edge_threshold: default_edge_threshold(),
            poll_interval_secs: default_poll_interval(),
            session_duration_secs: default_session_duration(),
            feed_url: default_feed_url(),
            feed_symbol: default_feed_symbol(),
            feed_interval: default_feed_interval(),
            feed_lookback: default_feed_lookback(),
            polymarket_clob_url: default_clob_url(),
            dry_run: true,
            http_timeout_ms: default_http_timeout_ms(),
            port: default_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_spend_ceiling(), Decimal::new(20, 0));
        assert_eq!(default_order_size(), Decimal::new(5, 0));
        assert_eq!(default_edge_threshold(), Decimal::new(10, 0));
        assert_eq!(default_poll_interval(), 20);
        assert_eq!(default_session_duration(), 3600);
        assert_eq!(default_feed_lookback(), 60);
        assert!(default_true());
    }

    #[test]
    fn validate_accepts_test_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_private_key() {
        let mut config = test_config();
        config.polymarket_private_key = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_placeholder_private_key() {
        let mut config = test_config();
        config.polymarket_private_key = "0xYOUR_PRIVATE_KEY_HERE".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_placeholder_funder() {
        let mut config = test_config();
        config.polymarket_funder = Some("YOUR_FUNDER_ADDRESS_HERE".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_requires_funder_for_magic_link() {
        let mut config = test_config();
        config.polymarket_signature_type = 1;
        config.polymarket_funder = None;
        assert!(config.validate().is_err());

        config.polymarket_funder = Some("0x0000000000000000000000000000000000000001".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_placeholder_token_id() {
        let mut config = test_config();
        config.up_token_id = "REPLACE_WITH_ETH_UP_TOKEN_ID".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_sizes() {
        let mut config = test_config();
        config.order_size = Decimal::ZERO;
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.spend_ceiling = Decimal::new(-1, 0);
        assert!(config.validate().is_err());
    }
}
