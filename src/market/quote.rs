//! Venue quote reader.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{BotError, MarketError};
use crate::session::QuoteSource;
use crate::trading::order::Side;

use super::client::PolymarketClient;

/// Convert a venue price fraction in [0, 1] to a percentage.
pub fn fraction_to_percent(fraction: Decimal) -> Decimal {
    fraction * Decimal::ONE_HUNDRED
}

/// Reads the venue's quoted probability for the buy side of an instrument.
///
/// A token the venue has no price for yields `Ok(None)`; that is a normal
/// outcome for an illiquid instrument and never an error.
#[derive(Debug, Clone)]
pub struct MarketQuoteReader {
    client: PolymarketClient,
}

impl MarketQuoteReader {
    /// Create a reader over the given client.
    pub fn new(client: PolymarketClient) -> Self {
        Self { client }
    }

    /// Quoted probability in [0, 100] for buying the token, if priced.
    #[instrument(skip(self), fields(token_id = %token_id))]
    pub async fn quote(&self, token_id: &str) -> Result<Option<Decimal>, MarketError> {
        match self.client.price(token_id, Side::Buy).await? {
            None => {
                debug!("Venue has no price for token");
                Ok(None)
            }
            Some(fraction) => {
                let percent = fraction_to_percent(fraction);
                debug!(percent = %percent, "Fetched venue quote");
                Ok(Some(percent))
            }
        }
    }
}

#[async_trait]
impl QuoteSource for MarketQuoteReader {
    async fn quote(&self, token_id: &str) -> Result<Option<Decimal>, BotError> {
        Ok(MarketQuoteReader::quote(self, token_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn converts_fraction_to_percent() {
        assert_eq!(fraction_to_percent(dec!(0.55)), dec!(55.00));
        assert_eq!(fraction_to_percent(dec!(0)), dec!(0));
        assert_eq!(fraction_to_percent(dec!(1)), dec!(100));
    }

    #[test]
    fn preserves_price_precision() {
        assert_eq!(fraction_to_percent(dec!(0.123)), dec!(12.300));
    }
}
