//! Session control loop, spend budget, and the seams between them.
//!
//! The controller is generic over three narrow traits so the decision and
//! budget logic can be exercised against deterministic fakes.

pub mod budget;
pub mod controller;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::BotError;
use crate::trading::order::OrderOutcome;

/// Source of the bot's own probability estimate, as a percentage.
#[async_trait]
pub trait ProbabilitySource {
    /// Estimate the probability of the outcome, in [0, 100].
    async fn estimate(&self) -> Result<Decimal, BotError>;
}

/// Source of the venue's quoted probability for an instrument.
#[async_trait]
pub trait QuoteSource {
    /// Quoted probability in [0, 100], or `None` when the venue has no price.
    async fn quote(&self, token_id: &str) -> Result<Option<Decimal>, BotError>;
}

/// Sink for buy instructions.
#[async_trait]
pub trait OrderSink {
    /// Submit a buy for `amount` USDC on the given token.
    async fn buy(&self, token_id: &str, amount: Decimal) -> Result<OrderOutcome, BotError>;
}

pub use budget::BudgetTracker;
pub use controller::{SessionController, SessionParams, SessionStats, SessionSummary};
