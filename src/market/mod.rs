//! Venue client and the market quote reader built on it.

pub mod client;
pub mod mock;
pub mod quote;

pub use client::PolymarketClient;
pub use quote::MarketQuoteReader;
