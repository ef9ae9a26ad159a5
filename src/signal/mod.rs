//! Price-history feed and the probability estimator built on it.

pub mod estimator;
pub mod feed;

pub use estimator::SignalEstimator;
pub use feed::{Candle, PriceFeed};
