//! Naive sizer
//!
//! Constant-quantity sizing with no risk management: LONG/SHORT trade the
//! signal's quantity, EXIT trades whatever flattens the current position.

use crate::domain::{Direction, SignalEvent, SignalKind};
use crate::sizers::{OrderIntent, OrderSizer};

#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSizer;

impl OrderSizer for NaiveSizer {
    fn size(&self, position: i64, signal: &SignalEvent) -> Option<OrderIntent> {
        match signal.kind {
            SignalKind::Long => Some(OrderIntent::new(Direction::Buy, signal.quantity)),
            SignalKind::Short => Some(OrderIntent::new(Direction::Sell, signal.quantity)),
            SignalKind::Exit if position > 0 => {
                Some(OrderIntent::new(Direction::Sell, position.unsigned_abs()))
            }
            SignalKind::Exit if position < 0 => {
                Some(OrderIntent::new(Direction::Buy, position.unsigned_abs()))
            }
            SignalKind::Exit | SignalKind::Unrecognized => None,
        }
    }

    fn name(&self) -> &str {
        "naive"
    }
}
