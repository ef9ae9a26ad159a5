//! Unified error types for the session bot.

use thiserror::Error;

/// Unified error type for the session bot.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Price-feed error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Market/venue error.
    #[error("market error: {0}")]
    Market(#[from] MarketError),

    /// Trading/order error.
    #[error("trading error: {0}")]
    Trading(#[from] TradingError),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Price-feed fetch and parse errors.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Failed to fetch candles for a symbol.
    #[error("failed to fetch candles for {symbol}: {reason}")]
    FetchFailed {
        /// The feed symbol that failed.
        symbol: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to parse feed data.
    #[error("failed to parse feed data: {0}")]
    ParseError(String),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Venue price-lookup errors.
///
/// A missing price is NOT an error; it is `Ok(None)` at the call site.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Failed to fetch a price for a token.
    #[error("failed to fetch price for {token_id}: {reason}")]
    FetchFailed {
        /// The token that failed.
        token_id: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to parse venue data.
    #[error("failed to parse market data: {0}")]
    ParseError(String),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Trading and order submission errors.
#[derive(Error, Debug)]
pub enum TradingError {
    /// Order submission failed at the transport level.
    #[error("order submission failed: {0}")]
    SubmissionFailed(String),

    /// Invalid order parameters.
    #[error("invalid order parameters: {0}")]
    InvalidParams(String),

    /// Signing error.
    #[error("signing error: {0}")]
    SigningError(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BotError>;
