//! Order types and submission vocabulary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    #[strum(serialize = "BUY", serialize = "buy")]
    Buy,
    /// Sell order.
    #[strum(serialize = "SELL", serialize = "sell")]
    Sell,
}

impl Side {
    /// API string for the side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// Order type (time-in-force).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Fill-or-kill: must fill entirely and immediately or cancel.
    #[default]
    #[strum(serialize = "FOK", serialize = "fok")]
    FOK,
    /// Fill-and-kill: fill what's available, cancel rest.
    #[strum(serialize = "FAK", serialize = "fak")]
    FAK,
    /// Good-till-cancelled: stays on book until filled or cancelled.
    #[strum(serialize = "GTC", serialize = "gtc")]
    GTC,
}

/// Parameters for a market order denominated in USDC.
#[derive(Debug, Clone)]
pub struct MarketOrderArgs {
    /// Token ID to trade.
    pub token_id: String,
    /// Order side (buy/sell).
    pub side: Side,
    /// USDC amount to commit.
    pub amount: Decimal,
    /// Order type.
    pub order_type: OrderType,
}

impl MarketOrderArgs {
    /// Create a fill-or-kill market buy.
    pub fn buy(token_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            token_id: token_id.into(),
            side: Side::Buy,
            amount,
            order_type: OrderType::FOK,
        }
    }

    /// Set the order type.
    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Validate order parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.token_id.is_empty() {
            return Err("token_id is required".to_string());
        }
        if self.amount <= Decimal::ZERO {
            return Err("amount must be positive".to_string());
        }
        Ok(())
    }
}

/// Order submission request body.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Token ID to trade.
    pub token_id: String,
    /// Order side (BUY/SELL).
    pub side: String,
    /// USDC amount to commit.
    pub amount: String,
    /// Fee rate basis points.
    pub fee_rate_bps: String,
    /// Nonce for order uniqueness.
    pub nonce: String,
    /// Expiration timestamp.
    pub expiration: String,
    /// Taker address.
    pub taker: String,
    /// Maker address.
    pub maker: String,
    /// Signature type.
    pub signature_type: u8,
    /// Order signature.
    pub signature: String,
    /// Order type (FOK/FAK/GTC).
    pub order_type: String,
}

/// Order submission acknowledgment from the venue.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAck {
    /// Order ID (various field names).
    #[serde(alias = "orderID", alias = "orderId", alias = "order_id", alias = "id")]
    pub order_id: Option<String>,
    /// Error message if any.
    pub error: Option<String>,
    /// Error code if any.
    pub error_code: Option<String>,
    /// Success flag.
    pub success: Option<bool>,
}

/// Typed outcome of an order submission.
///
/// The venue acknowledgment is inspected rather than passed upward raw, so
/// callers can account for spend only on confirmed acceptance.
#[derive(Debug, Clone)]
pub enum OrderOutcome {
    /// The venue accepted the order.
    Accepted {
        /// Venue-assigned order ID.
        order_id: String,
        /// Raw acknowledgment, logged but not further interpreted.
        raw: serde_json::Value,
    },
    /// The venue rejected the order (including an unfilled fill-or-kill).
    Rejected {
        /// Venue-reported reason.
        reason: String,
    },
    /// No order was submitted (non-positive amount or simulation no-op).
    Skipped,
}

impl OrderOutcome {
    /// Check whether the order was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, OrderOutcome::Accepted { .. })
    }
}
