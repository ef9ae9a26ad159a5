//! Mock venue for unit testing.
//!
//! Implements the session seams ([`QuoteSource`], [`OrderSink`]) without
//! making network requests, with configurable quotes and failure modes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{BotError, MarketError, TradingError};
use crate::session::{OrderSink, QuoteSource};
use crate::trading::order::OrderOutcome;

/// Configuration for mock venue behavior.
#[derive(Debug, Clone, Default)]
pub struct MockVenueConfig {
    /// Quote (as a percentage) returned when no scripted quote is queued.
    pub quote: Option<Decimal>,
    /// Whether quote lookups fail.
    pub fail_quotes: bool,
    /// Whether order submissions fail at the transport level.
    pub fail_orders: bool,
    /// Whether the venue rejects every submitted order.
    pub reject_orders: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock venue for testing the session loop.
#[derive(Debug, Clone)]
pub struct MockVenue {
    /// Mock configuration.
    config: MockVenueConfig,
    /// Scripted per-round quotes, consumed before falling back to the default.
    scripted_quotes: Arc<Mutex<VecDeque<Option<Decimal>>>>,
    /// Orders submitted so far, as (token_id, amount).
    orders: Arc<Mutex<Vec<(String, Decimal)>>>,
}

impl MockVenue {
    /// Create a mock venue with default configuration (no quote).
    pub fn new() -> Self {
        Self::with_config(MockVenueConfig::default())
    }

    /// Create a mock venue with custom configuration.
    pub fn with_config(config: MockVenueConfig) -> Self {
        Self {
            config,
            scripted_quotes: Arc::new(Mutex::new(VecDeque::new())),
            orders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock venue that always quotes the given percentage.
    pub fn with_quote(quote: Decimal) -> Self {
        Self::with_config(MockVenueConfig {
            quote: Some(quote),
            ..Default::default()
        })
    }

    /// Queue a quote for the next round; `None` means "no price".
    pub fn push_quote(&self, quote: Option<Decimal>) {
        self.scripted_quotes.lock().unwrap().push_back(quote);
    }

    /// Orders submitted so far, as (token_id, amount).
    pub fn submitted_orders(&self) -> Vec<(String, Decimal)> {
        self.orders.lock().unwrap().clone()
    }

    /// Sum of all submitted order amounts.
    pub fn total_submitted(&self) -> Decimal {
        self.orders.lock().unwrap().iter().map(|(_, a)| *a).sum()
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

impl Default for MockVenue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for MockVenue {
    async fn quote(&self, token_id: &str) -> Result<Option<Decimal>, BotError> {
        self.simulate_latency().await;

        if self.config.fail_quotes {
            return Err(MarketError::FetchFailed {
                token_id: token_id.to_string(),
                reason: "mock quote failure".to_string(),
            }
            .into());
        }

        let scripted = self.scripted_quotes.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or(self.config.quote))
    }
}

#[async_trait]
impl OrderSink for MockVenue {
    async fn buy(&self, token_id: &str, amount: Decimal) -> Result<OrderOutcome, BotError> {
        self.simulate_latency().await;

        if self.config.fail_orders {
            return Err(
                TradingError::SubmissionFailed("mock order failure".to_string()).into(),
            );
        }

        if amount <= Decimal::ZERO {
            return Ok(OrderOutcome::Skipped);
        }

        let order_number = {
            let mut orders = self.orders.lock().unwrap();
            orders.push((token_id.to_string(), amount));
            orders.len()
        };

        if self.config.reject_orders {
            return Ok(OrderOutcome::Rejected {
                reason: "mock rejection".to_string(),
            });
        }

        Ok(OrderOutcome::Accepted {
            order_id: format!("mock-order-{}", order_number),
            raw: serde_json::json!({ "orderID": format!("mock-order-{}", order_number) }),
        })
    }
}
