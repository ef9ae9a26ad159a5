//! The session control loop.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::BotError;
use crate::metrics;
use crate::trading::order::OrderOutcome;

use super::budget::BudgetTracker;
use super::{OrderSink, ProbabilitySource, QuoteSource};

/// Session-scoped parameters, fixed at construction.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// CLOB token ID of the outcome to buy.
    pub token_id: String,
    /// USDC per trade.
    pub order_size: Decimal,
    /// Maximum cumulative USDC spend for the session.
    pub spend_ceiling: Decimal,
    /// Minimum edge in percentage points to trade.
    pub edge_threshold: Decimal,
    /// Pause between evaluation rounds.
    pub poll_interval: Duration,
    /// Total session length.
    pub session_duration: Duration,
}

impl SessionParams {
    /// Extract the session-scoped subset of the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            token_id: config.up_token_id.clone(),
            order_size: config.order_size,
            spend_ceiling: config.spend_ceiling,
            edge_threshold: config.edge_threshold,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            session_duration: Duration::from_secs(config.session_duration_secs),
        }
    }
}

/// Live session statistics, shared with the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Evaluation rounds started.
    pub iterations: u64,
    /// Orders accepted by the venue.
    pub trades_executed: u64,
    /// Rounds where the venue had no quote.
    pub no_quote_rounds: u64,
    /// Rounds that ended in a caught error.
    pub iteration_errors: u64,
    /// Cumulative USDC committed.
    pub total_spent: Decimal,
}

/// Result of one completed session.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Total USDC committed over the session.
    pub total_spent: Decimal,
    /// Final counters for the session.
    pub stats: SessionStats,
}

/// Per-iteration trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDecision {
    /// Edge cleared the threshold and the order fits the budget.
    Trade,
    /// Edge at or below the configured threshold.
    EdgeTooSmall,
    /// Edge cleared the threshold but the order would breach the ceiling.
    BudgetExhausted,
}

impl TradeDecision {
    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            TradeDecision::Trade => "trade",
            TradeDecision::EdgeTooSmall => "edge-too-small",
            TradeDecision::BudgetExhausted => "budget-exhausted",
        }
    }
}

/// Decide whether to trade this round.
///
/// The budget gate dominates: a large edge never authorizes an order that
/// would breach the spend ceiling.
fn decide(
    edge: Decimal,
    threshold: Decimal,
    budget: &BudgetTracker,
    order_size: Decimal,
) -> TradeDecision {
    if edge <= threshold {
        TradeDecision::EdgeTooSmall
    } else if !budget.can_afford(order_size) {
        TradeDecision::BudgetExhausted
    } else {
        TradeDecision::Trade
    }
}

/// Drives one time-boxed trading session.
///
/// The loop runs until the wall clock passes `start + session_duration`,
/// sleeping a fixed `poll_interval` between rounds (cadence is not adjusted
/// for iteration latency). Errors raised inside a round are caught, logged,
/// and counted; nothing propagates out of `run` once the session has
/// started. Spend is recorded against the budget only for orders the venue
/// confirmed as accepted.
pub struct SessionController<S, Q, O> {
    params: SessionParams,
    signal: S,
    quotes: Q,
    orders: O,
    budget: BudgetTracker,
    stats: SessionStats,
    shared_stats: Option<Arc<RwLock<SessionStats>>>,
}

impl<S, Q, O> SessionController<S, Q, O>
where
    S: ProbabilitySource,
    Q: QuoteSource,
    O: OrderSink,
{
    /// Create a controller over the given components.
    pub fn new(params: SessionParams, signal: S, quotes: Q, orders: O) -> Self {
        let budget = BudgetTracker::new(params.spend_ceiling);
        Self {
            params,
            signal,
            quotes,
            orders,
            budget,
            stats: SessionStats::default(),
            shared_stats: None,
        }
    }

    /// Publish live stats into the given handle after every round.
    pub fn with_shared_stats(mut self, shared: Arc<RwLock<SessionStats>>) -> Self {
        self.shared_stats = Some(shared);
        self
    }

    /// Run one session to completion and report what was spent.
    pub async fn run(mut self) -> SessionSummary {
        let end = Instant::now() + self.params.session_duration;

        info!(
            started_at = %OffsetDateTime::now_utc(),
            token_id = %self.params.token_id,
            duration_secs = self.params.session_duration.as_secs(),
            poll_secs = self.params.poll_interval.as_secs(),
            order_size = %self.params.order_size,
            spend_ceiling = %self.params.spend_ceiling,
            edge_threshold = %self.params.edge_threshold,
            "Session started"
        );

        while Instant::now() < end {
            self.stats.iterations += 1;
            metrics::inc_iterations();

            if let Err(e) = self.iterate().await {
                self.stats.iteration_errors += 1;
                metrics::inc_iteration_errors();
                warn!(error = %e, "Iteration error, continuing session");
            }

            self.publish_stats().await;
            sleep(self.params.poll_interval).await;
        }

        info!("========================================");
        info!("SESSION COMPLETE - FINAL SUMMARY");
        info!("========================================");
        info!("Ended at: {}", OffsetDateTime::now_utc());
        info!("Iterations completed: {}", self.stats.iterations);
        info!("Trades executed: {}", self.stats.trades_executed);
        info!("Rounds without quote: {}", self.stats.no_quote_rounds);
        info!("Iteration errors: {}", self.stats.iteration_errors);
        info!("----------------------------------------");
        info!(
            "Total spent: ${} of ${} ceiling",
            self.budget.spent(),
            self.budget.ceiling()
        );
        info!("========================================");

        SessionSummary {
            total_spent: self.budget.spent(),
            stats: self.stats,
        }
    }

    /// One evaluation round: estimate, quote, decide, maybe buy.
    async fn iterate(&mut self) -> Result<(), BotError> {
        let estimate_start = std::time::Instant::now();
        let estimate = self.signal.estimate().await?;
        metrics::record_estimate_latency(estimate_start);

        let quote_start = std::time::Instant::now();
        let quote = self.quotes.quote(&self.params.token_id).await?;
        metrics::record_quote_latency(quote_start);

        let Some(market_quote) = quote else {
            self.stats.no_quote_rounds += 1;
            metrics::inc_quotes_unavailable();
            info!("No venue quote for token, skipping this round");
            return Ok(());
        };

        let edge = estimate - market_quote;
        let decision = decide(
            edge,
            self.params.edge_threshold,
            &self.budget,
            self.params.order_size,
        );

        info!(
            estimate = %estimate,
            market = %market_quote,
            edge = %edge,
            decision = decision.label(),
            "Evaluation round"
        );

        if decision != TradeDecision::Trade {
            return Ok(());
        }

        let order_start = std::time::Instant::now();
        let outcome = self
            .orders
            .buy(&self.params.token_id, self.params.order_size)
            .await?;
        metrics::record_order_latency(order_start);

        match outcome {
            OrderOutcome::Accepted { order_id, raw } => {
                self.budget.record(self.params.order_size);
                self.stats.trades_executed += 1;
                self.stats.total_spent = self.budget.spent();
                metrics::inc_trades_executed();
                info!(
                    order_id = %order_id,
                    response = %raw,
                    spent = %self.budget.spent(),
                    remaining = %self.budget.remaining(),
                    "Buy order accepted"
                );
            }
            OrderOutcome::Rejected { reason } => {
                metrics::inc_orders_rejected();
                warn!(reason = %reason, "Buy order rejected, budget unchanged");
            }
            OrderOutcome::Skipped => {
                debug!("Order skipped");
            }
        }

        Ok(())
    }

    async fn publish_stats(&self) {
        if let Some(shared) = &self.shared_stats {
            *shared.write().await = self.stats.clone();
        }
    }
}
