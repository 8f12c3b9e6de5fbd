//! Order types: direction, order type, and the order event.

use super::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// +1 for buys, -1 for sells.
    pub fn sign(self) -> i64 {
        match self {
            Self::Buy => 1,
            Self::Sell => -1,
        }
    }

    /// `sign() * quantity`, or `None` when the quantity does not fit in an `i64`.
    pub fn signed(self, quantity: u64) -> Option<i64> {
        i64::try_from(quantity).ok().map(|q| self.sign() * q)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => f.write_str("BUY"),
            Self::Sell => f.write_str("SELL"),
        }
    }
}

/// How the execution side should treat the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Fill at the execution side's market price.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => f.write_str("MKT"),
        }
    }
}

/// An order handed to the execution collaborator.
///
/// `profit` is realized profit attributed to this order. The engine creates it
/// at 0.0; the execution side fills it in before echoing the order back on a fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub id: OrderId,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub order_type: OrderType,
    pub quantity: u64,
    pub direction: Direction,
    #[serde(default)]
    pub profit: f64,
}

impl OrderEvent {
    pub fn market(
        id: OrderId,
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        quantity: u64,
        direction: Direction,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            timestamp,
            order_type: OrderType::Market,
            quantity,
            direction,
            profit: 0.0,
        }
    }
}
