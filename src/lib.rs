//! Hourly ETH momentum session bot for Polymarket.
//!
//! This library runs one time-boxed trading session: every poll interval it
//! estimates the probability that ETH ends the hour up (from recent Binance
//! candles), reads Polymarket's quoted probability for the "UP" outcome
//! token, and buys a fixed-size fill-or-kill order when the edge between the
//! two clears a threshold - capped by a per-session spend ceiling.
//!
//! # Decision rule
//!
//! ```text
//! estimate:  62%   (own model, from last-hour momentum)
//! market:    48%   (Polymarket UP price * 100)
//! ─────────────────
//! edge:      14 > 10 threshold  →  buy $5 UP (if budget allows)
//! ```
//!
//! A failed feed or venue call costs one round, never the session; only the
//! spend ceiling and the clock stop trading.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`signal`]: Price-history feed and probability estimator
//! - [`market`]: Polymarket client and quote reader
//! - [`trading`]: Order vocabulary and execution
//! - [`session`]: Session control loop and spend budget
//! - [`api`]: HTTP API for health/metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod session;
pub mod signal;
pub mod signing;
pub mod trading;
pub mod utils;

pub use config::Config;
pub use error::{BotError, Result};
