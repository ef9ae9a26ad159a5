//! Polymarket CLOB API client.

use alloy::signers::local::PrivateKeySigner;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{MarketError, TradingError};
use crate::signing;
use crate::trading::order::Side;

/// Polymarket CLOB API client.
///
/// Holds the pre-authenticated handle the rest of the bot consumes: the
/// tuned HTTP client and the wallet signer built once from config.
#[derive(Debug, Clone)]
pub struct PolymarketClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for CLOB API.
    clob_url: String,
    /// Wallet signer derived from the configured private key.
    signer: PrivateKeySigner,
    /// Signature type (0=EOA, 1=Magic.link, 2=Gnosis).
    signature_type: u8,
    /// Funder address (for Magic.link).
    funder: Option<String>,
    /// Chain ID (137 for Polygon).
    chain_id: u64,
}

/// Price response from the CLOB API.
#[derive(Debug, Clone, Deserialize)]
struct PriceResponse {
    /// Price as a decimal string, absent when the book has no price.
    price: Option<String>,
}

/// Balance allowance response from API.
#[derive(Debug, Clone, Deserialize)]
struct BalanceAllowanceResponse {
    /// Balance in wei.
    balance: Option<String>,
}

impl PolymarketClient {
    /// Create a new Polymarket client from config.
    ///
    /// Fails when the configured private key cannot produce a signer, which
    /// is a configuration fault and fatal before any session starts.
    pub fn new(config: &Config) -> Result<Self, TradingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(std::time::Duration::from_millis(500))
            .tcp_nodelay(true)
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()
            .expect("failed to create HTTP client");

        let signer = signing::create_signer(&config.polymarket_private_key)?;

        Ok(Self {
            http,
            clob_url: config.polymarket_clob_url.clone(),
            signer,
            signature_type: config.polymarket_signature_type,
            funder: config.polymarket_funder.clone(),
            chain_id: config.chain_id,
        })
    }

    /// Get the HTTP client reference.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Get the wallet signer.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Get the wallet address.
    pub fn address(&self) -> String {
        signing::address_of(&self.signer)
    }

    /// Get the signature type.
    pub fn signature_type(&self) -> u8 {
        self.signature_type
    }

    /// Get funder address.
    pub fn funder(&self) -> Option<&str> {
        self.funder.as_deref()
    }

    /// Get the CLOB base URL.
    pub fn clob_url(&self) -> &str {
        &self.clob_url
    }

    /// Get the chain ID.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Look up the venue price for one side of a token.
    ///
    /// Returns `Ok(None)` when the venue reports no price for the token;
    /// that is a normal outcome for an illiquid instrument, not a fault.
    #[instrument(skip(self), fields(token_id = %token_id, side = %side))]
    pub async fn price(&self, token_id: &str, side: Side) -> Result<Option<Decimal>, MarketError> {
        let url = format!("{}/price", self.clob_url);

        let response = self
            .http
            .get(&url)
            .query(&[("token_id", token_id), ("side", side.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(MarketError::FetchFailed {
                token_id: token_id.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let body: PriceResponse = response
            .json()
            .await
            .map_err(|e| MarketError::ParseError(format!("failed to parse price: {}", e)))?;

        match body.price.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => {
                let price: Decimal = raw.parse().map_err(|e| {
                    MarketError::ParseError(format!("invalid price {:?}: {}", raw, e))
                })?;
                debug!(price = %price, "Fetched venue price");
                Ok(Some(price))
            }
        }
    }

    /// Get USDC balance using authenticated API call.
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> Result<Decimal, TradingError> {
        debug!("Getting balance from Polymarket API");

        let url = format!("{}/balance-allowance", self.clob_url);
        let auth_headers = signing::auth_headers(&self.signer).await?;

        let mut request = self.http.get(&url);
        for (key, value) in auth_headers {
            request = request.header(&key, &value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TradingError::SubmissionFailed(format!("failed to get balance: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TradingError::SubmissionFailed(format!(
                "balance request failed: HTTP {} - {}",
                status, body
            )));
        }

        let balance_response: BalanceAllowanceResponse = response
            .json()
            .await
            .map_err(|e| TradingError::SubmissionFailed(format!("failed to parse balance: {}", e)))?;

        // Balance comes back in wei with 6 decimals for USDC
        let balance_wei: Decimal = balance_response
            .balance
            .as_deref()
            .unwrap_or("0")
            .parse()
            .unwrap_or(Decimal::ZERO);

        let balance = balance_wei / Decimal::new(1_000_000, 0);

        debug!(balance = %balance, "Retrieved USDC balance");

        Ok(balance)
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
            chain_id: 137,
            up_token_id: "test-up-token".to_string(),
            spend_ceiling: Decimal::new(20, 0),
            order_size: Decimal::new(5, 0),
            edge_threshold: Decimal::new(10, 0),
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

    #[test]
    fn client_creation_works() {
        let client = PolymarketClient::new(&test_config()).unwrap();
        assert_eq!(client.chain_id(), 137);
        assert_eq!(client.clob_url(), "https://clob.polymarket.com");
    }

    #[test]
    fn client_creation_rejects_bad_key() {
        let mut config = test_config();
        config.polymarket_private_key = "0xnot_hex".to_string();
        assert!(PolymarketClient::new(&config).is_err());
    }

    #[test]
    fn address_is_checksummed_hex() {
        let client = PolymarketClient::new(&test_config()).unwrap();
        let address = client.address();
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42); // 0x + 40 hex chars
    }
}
