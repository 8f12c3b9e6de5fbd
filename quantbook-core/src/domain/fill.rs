use crate::domain::ids::OrderId;
use crate::domain::order::{Direction, OrderEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Execution report from the brokerage side.
///
/// Carries the order that produced it so the portfolio can attribute profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillEvent {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub exchange: String,
    pub quantity: u64,
    pub direction: Direction,
    /// Price per unit at which the fill executed.
    pub fill_price: f64,
    pub commission: f64,
    pub order: OrderEvent,
}

impl FillEvent {
    /// Signed notional: +q*price for buys, -q*price for sells.
    pub fn signed_notional(&self) -> f64 {
        self.direction.sign() as f64 * self.quantity as f64 * self.fill_price
    }

    /// Flatten into a log record, replacing the order with its ID.
    pub fn to_record(&self) -> FillRecord {
        FillRecord {
            timestamp: self.timestamp,
            symbol: self.symbol.clone(),
            exchange: self.exchange.clone(),
            quantity: self.quantity,
            direction: self.direction,
            fill_price: self.fill_price,
            commission: self.commission,
            order_id: self.order.id,
        }
    }
}

/// Fill as recorded in the portfolio's fill log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRecord {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub exchange: String,
    pub quantity: u64,
    pub direction: Direction,
    pub fill_price: f64,
    pub commission: f64,
    pub order_id: OrderId,
}
