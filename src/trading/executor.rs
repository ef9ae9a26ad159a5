//! Order execution against the venue.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use super::order::{MarketOrderArgs, OrderOutcome, OrderRequest, OrderType, SubmitAck};
use crate::error::{BotError, TradingError};
use crate::market::PolymarketClient;
use crate::session::OrderSink;
use crate::signing;

/// Submits fixed-size fill-or-kill market buys through the venue client.
///
/// The venue acknowledgment is inspected here and surfaced as a typed
/// [`OrderOutcome`], so a rejected fill-or-kill never looks like a fill to
/// the caller's bookkeeping.
#[derive(Debug, Clone)]
pub struct OrderExecutor {
    /// Pre-authenticated venue client.
    client: PolymarketClient,
    /// Order type for all submissions.
    order_type: OrderType,
    /// Simulation mode (no real orders).
    dry_run: bool,
}

impl OrderExecutor {
    /// Create an executor over the given client.
    pub fn new(client: PolymarketClient, dry_run: bool) -> Self {
        Self {
            client,
            order_type: OrderType::FOK,
            dry_run,
        }
    }

    /// Submit a market buy for `amount` USDC on the given token.
    ///
    /// A non-positive amount is a no-op ([`OrderOutcome::Skipped`]). In
    /// dry-run mode the order is not submitted and a simulated acceptance is
    /// returned so session accounting still exercises the budget path.
    #[instrument(skip(self), fields(token_id = %token_id, amount = %amount))]
    pub async fn buy(&self, token_id: &str, amount: Decimal) -> Result<OrderOutcome, TradingError> {
        if amount <= Decimal::ZERO {
            debug!("Non-positive amount, skipping order");
            return Ok(OrderOutcome::Skipped);
        }

        let args = MarketOrderArgs::buy(token_id, amount).with_order_type(self.order_type);
        args.validate().map_err(TradingError::InvalidParams)?;

        if self.dry_run {
            let order_id = format!("dry-run-{}", chrono::Utc::now().timestamp_millis());
            info!(order_id = %order_id, "SIMULATION MODE - order not submitted");
            return Ok(OrderOutcome::Accepted {
                order_id,
                raw: serde_json::json!({ "dry_run": true }),
            });
        }

        debug!(order_type = %args.order_type, "Submitting market order");

        let address = self.client.address();
        let maker = self.client.funder().unwrap_or(&address).to_string();

        let auth_headers = signing::auth_headers(self.client.signer()).await?;

        let nonce = chrono::Utc::now().timestamp_millis().to_string();
        let expiration = (chrono::Utc::now().timestamp() + 3600).to_string(); // 1 hour from now

        // Order message to sign: token_id + side + amount + nonce + expiration
        let order_message = format!(
            "{}:{}:{}:{}:{}",
            args.token_id,
            args.side.as_str(),
            args.amount,
            nonce,
            expiration
        );

        let signature_bytes =
            signing::sign_message(self.client.signer(), order_message.as_bytes()).await?;
        let signature = format!("0x{}", hex::encode(&signature_bytes));

        let order_request = OrderRequest {
            token_id: args.token_id.clone(),
            side: args.side.as_str().to_string(),
            amount: args.amount.to_string(),
            fee_rate_bps: "0".to_string(),
            nonce,
            expiration,
            taker: "0x0000000000000000000000000000000000000000".to_string(),
            maker,
            signature_type: self.client.signature_type(),
            signature,
            order_type: args.order_type.to_string(),
        };

        let url = format!("{}/order", self.client.clob_url());

        let mut request = self.client.http().post(&url).json(&order_request);
        for (key, value) in auth_headers {
            request = request.header(&key, &value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TradingError::SubmissionFailed(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Venue refused order");
            return Ok(OrderOutcome::Rejected {
                reason: format!("HTTP {} - {}", status, body),
            });
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TradingError::SubmissionFailed(format!("Failed to parse response: {}", e)))?;

        let outcome = interpret_ack(raw);
        match &outcome {
            OrderOutcome::Accepted { order_id, .. } => {
                info!(order_id = %order_id, "Order accepted");
            }
            OrderOutcome::Rejected { reason } => {
                warn!(reason = %reason, "Order rejected");
            }
            OrderOutcome::Skipped => {}
        }

        Ok(outcome)
    }
}

#[async_trait]
impl OrderSink for OrderExecutor {
    async fn buy(&self, token_id: &str, amount: Decimal) -> Result<OrderOutcome, BotError> {
        Ok(OrderExecutor::buy(self, token_id, amount).await?)
    }
}

/// Classify a venue acknowledgment as accepted or rejected.
///
/// An acknowledgment with an error message, an explicit `success: false`, or
/// no order ID counts as a rejection.
fn interpret_ack(raw: serde_json::Value) -> OrderOutcome {
    let ack: SubmitAck = match serde_json::from_value(raw.clone()) {
        Ok(ack) => ack,
        Err(e) => {
            return OrderOutcome::Rejected {
                reason: format!("unrecognized acknowledgment: {}", e),
            }
        }
    };

    if let Some(error) = ack.error {
        let reason = match ack.error_code {
            Some(code) => format!("{} ({})", error, code),
            None => error,
        };
        return OrderOutcome::Rejected { reason };
    }

    if ack.success == Some(false) {
        return OrderOutcome::Rejected {
            reason: "venue reported success=false".to_string(),
        };
    }

    match ack.order_id {
        Some(order_id) => OrderOutcome::Accepted { order_id, raw },
        None => OrderOutcome::Rejected {
            reason: "no order ID in acknowledgment".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn test_config() -> Config {
        Config {
            polymarket_private_key:
                "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
            polymarket_signature_type: 0,
            polymarket_funder: None,
            chain_id: 137,
            up_token_id: "test-up-token".to_string(),
            spend_ceiling: dec!(20),
            order_size: dec!(5),
            edge_threshold: dec!(10),
            poll_interval_secs: 20,
            session_duration_secs: 3600,
            feed_url: "https://api.binance.com".to_string(),
            feed_symbol: "ETHUSDT".to_string(),
            feed_interval: "1m".to_string(),
            feed_lookback: 60,
            polymarket_clob_url: "https://clob.polymarket.com".to_string(),
            dry_run: true,
            http_timeout_ms: 10_000,
            port: 8080,
            rust_log: "info".to_string(),
            verbose: false,
        }
    }

    fn test_executor(dry_run: bool) -> OrderExecutor {
        let client = PolymarketClient::new(&test_config()).unwrap();
        OrderExecutor::new(client, dry_run)
    }

    #[tokio::test]
    async fn non_positive_amount_is_skipped() {
        let executor = test_executor(false);

        let zero = executor.buy("token", dec!(0)).await.unwrap();
        assert!(matches!(zero, OrderOutcome::Skipped));

        let negative = executor.buy("token", dec!(-5)).await.unwrap();
        assert!(matches!(negative, OrderOutcome::Skipped));
    }

    #[tokio::test]
    async fn dry_run_is_simulated_acceptance() {
        let executor = test_executor(true);

        let outcome = executor.buy("token", dec!(5)).await.unwrap();
        match outcome {
            OrderOutcome::Accepted { order_id, raw } => {
                assert!(order_id.starts_with("dry-run-"));
                assert_eq!(raw["dry_run"], json!(true));
            }
            other => panic!("expected simulated acceptance, got {:?}", other),
        }
    }

    #[test]
    fn ack_with_order_id_is_accepted() {
        let outcome = interpret_ack(json!({"orderID": "abc123", "success": true}));
        match outcome {
            OrderOutcome::Accepted { order_id, .. } => assert_eq!(order_id, "abc123"),
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn ack_with_error_is_rejected() {
        let outcome = interpret_ack(json!({"error": "not enough balance", "error_code": "E42"}));
        match outcome {
            OrderOutcome::Rejected { reason } => {
                assert!(reason.contains("not enough balance"));
                assert!(reason.contains("E42"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn ack_without_order_id_is_rejected() {
        let outcome = interpret_ack(json!({"success": true}));
        assert!(matches!(outcome, OrderOutcome::Rejected { .. }));
    }

    #[test]
    fn ack_success_false_is_rejected() {
        let outcome = interpret_ack(json!({"orderID": "abc123", "success": false}));
        assert!(matches!(outcome, OrderOutcome::Rejected { .. }));
    }
}
