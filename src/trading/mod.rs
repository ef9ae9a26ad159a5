//! Order vocabulary and execution.

pub mod executor;
pub mod order;

pub use executor::OrderExecutor;
pub use order::{MarketOrderArgs, OrderOutcome, OrderType, Side};
