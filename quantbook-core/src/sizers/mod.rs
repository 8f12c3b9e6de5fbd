//! Order sizers: turn a signal into at most one order.
//!
//! Sizers are pure: they see the current signed position and the signal, and
//! return a direction/quantity pair or nothing. ID assignment and logging stay
//! with the portfolio.

pub mod naive;

pub use naive::NaiveSizer;

use crate::domain::{Direction, SignalEvent};

/// Direction and size of an order before it has an ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderIntent {
    pub direction: Direction,
    pub quantity: u64,
}

impl OrderIntent {
    pub fn new(direction: Direction, quantity: u64) -> Self {
        Self {
            direction,
            quantity,
        }
    }
}

/// Position sizing policy
///
/// # Responsibilities
/// - Convert current position + signal → zero or one order intent
///
/// # Non-Responsibilities
/// - Sizers do NOT mutate ledgers
/// - Sizers do NOT validate symbols (the portfolio does that first)
pub trait OrderSizer: Send + Sync {
    fn size(&self, position: i64, signal: &SignalEvent) -> Option<OrderIntent>;

    /// Sizer name for logging
    fn name(&self) -> &str;
}
