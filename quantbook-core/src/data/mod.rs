//! Market data seam.
//!
//! The portfolio reads the latest bar timestamp and values through
//! [`MarketData`] and never owns a feed. [`BarTape`] is an in-memory replay
//! source for harnesses and tests.

pub mod tape;

pub use tape::BarTape;

use crate::domain::BarField;
use chrono::{DateTime, Utc};

/// Read-only view of the most recent bar per symbol.
pub trait MarketData {
    /// Timestamp of the latest bar seen for `symbol`.
    fn latest_bar_timestamp(&self, symbol: &str) -> Option<DateTime<Utc>>;

    /// A field of the latest bar seen for `symbol`.
    fn latest_bar_value(&self, symbol: &str, field: BarField) -> Option<f64>;
}
