//! Probability estimate derived from recent price momentum.
//!
//! The mapping here is a deliberately crude placeholder strategy: last-hour
//! percent change scaled into a probability. Replace with a real model before
//! trusting the edge it produces.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::BotError;
use crate::session::ProbabilitySource;

use super::feed::{Candle, PriceFeed};

/// Neutral probability returned for degenerate input.
const NEUTRAL: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Lower clamp bound, avoids degenerate certainty.
const FLOOR: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Upper clamp bound.
const CEILING: Decimal = Decimal::from_parts(95, 0, 0, false, 0);

/// Map a percent price change to a probability in [5, 95].
///
/// `50 + 2 * change`, clamped. Pure and deterministic.
pub fn probability_from_change(change_pct: Decimal) -> Decimal {
    let base = NEUTRAL + change_pct * Decimal::TWO;
    base.clamp(FLOOR, CEILING)
}

/// Estimate the "UP" probability from a candle window, oldest first.
///
/// Uses the percent change from the earliest open to the latest close.
/// Fewer than two candles (or a non-positive earliest open) yields the
/// neutral 50 rather than failing.
pub fn estimate_from_candles(candles: &[Candle]) -> Decimal {
    if candles.len() < 2 {
        return NEUTRAL;
    }

    // len >= 2 guarantees both ends exist
    let first = &candles[0];
    let last = &candles[candles.len() - 1];

    if first.open <= Decimal::ZERO {
        return NEUTRAL;
    }

    let change_pct = (last.close - first.open) / first.open * Decimal::ONE_HUNDRED;
    probability_from_change(change_pct)
}

/// Probability estimator backed by the candle feed.
#[derive(Debug, Clone)]
pub struct SignalEstimator {
    feed: PriceFeed,
}

impl SignalEstimator {
    /// Create an estimator over the given feed.
    pub fn new(feed: PriceFeed) -> Self {
        Self { feed }
    }

    /// Fetch the candle window and estimate the "UP" probability.
    #[instrument(skip(self))]
    pub async fn estimate(&self) -> Result<Decimal, crate::error::FeedError> {
        let candles = self.feed.recent_candles().await?;
        let estimate = estimate_from_candles(&candles);

        debug!(
            candles = candles.len(),
            estimate = %estimate,
            "Computed probability estimate"
        );

        Ok(estimate)
    }
}

#[async_trait]
impl ProbabilitySource for SignalEstimator {
    async fn estimate(&self) -> Result<Decimal, BotError> {
        Ok(SignalEstimator::estimate(self).await?)
    }
}
