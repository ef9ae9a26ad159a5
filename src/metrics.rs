//! Prometheus metrics for session monitoring.
//!
//! Counters for the session's evaluation rounds and trade outcomes, and
//! latency histograms for the external calls each round makes.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Signal estimate latency metric name.
pub const METRIC_ESTIMATE_LATENCY: &str = "estimate_latency_ms";
/// Venue quote fetch latency metric name.
pub const METRIC_QUOTE_LATENCY: &str = "quote_fetch_latency_ms";
/// Order submission latency metric name.
pub const METRIC_ORDER_SUBMIT_LATENCY: &str = "order_submit_latency_ms";
/// Evaluation rounds counter metric name.
pub const METRIC_ITERATIONS: &str = "session_iterations_total";
/// Trades executed counter metric name.
pub const METRIC_TRADES_EXECUTED: &str = "trades_executed_total";
/// Orders rejected counter metric name.
pub const METRIC_ORDERS_REJECTED: &str = "orders_rejected_total";
/// Unavailable quote rounds counter metric name.
pub const METRIC_QUOTES_UNAVAILABLE: &str = "quotes_unavailable_total";
/// Caught iteration errors counter metric name.
pub const METRIC_ITERATION_ERRORS: &str = "iteration_errors_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_ESTIMATE_LATENCY,
        "Signal estimate latency in milliseconds"
    );
    describe_histogram!(
        METRIC_QUOTE_LATENCY,
        "Venue quote fetch latency in milliseconds"
    );
    describe_histogram!(
        METRIC_ORDER_SUBMIT_LATENCY,
        "Order submission latency in milliseconds"
    );

    describe_counter!(METRIC_ITERATIONS, "Total number of evaluation rounds");
    describe_counter!(
        METRIC_TRADES_EXECUTED,
        "Total number of orders accepted by the venue"
    );
    describe_counter!(
        METRIC_ORDERS_REJECTED,
        "Total number of orders rejected by the venue"
    );
    describe_counter!(
        METRIC_QUOTES_UNAVAILABLE,
        "Total number of rounds where the venue had no quote"
    );
    describe_counter!(
        METRIC_ITERATION_ERRORS,
        "Total number of caught per-iteration errors"
    );

    debug!("Metrics initialized");
}

/// Record signal estimate latency.
pub fn record_estimate_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_ESTIMATE_LATENCY).record(latency_ms);
}

/// Record venue quote fetch latency.
pub fn record_quote_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_QUOTE_LATENCY).record(latency_ms);
}

/// Record order submission latency.
pub fn record_order_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_ORDER_SUBMIT_LATENCY).record(latency_ms);
}

/// Increment the evaluation rounds counter.
pub fn inc_iterations() {
    counter!(METRIC_ITERATIONS).increment(1);
}

/// Increment the trades executed counter.
pub fn inc_trades_executed() {
    counter!(METRIC_TRADES_EXECUTED).increment(1);
}

/// Increment the rejected orders counter.
pub fn inc_orders_rejected() {
    counter!(METRIC_ORDERS_REJECTED).increment(1);
}

/// Increment the unavailable-quote rounds counter.
pub fn inc_quotes_unavailable() {
    counter!(METRIC_QUOTES_UNAVAILABLE).increment(1);
}

/// Increment the caught iteration errors counter.
pub fn inc_iteration_errors() {
    counter!(METRIC_ITERATION_ERRORS).increment(1);
}
