use crate::domain::BarField;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors the portfolio engine reports to its caller.
///
/// Only malformed configuration or input surfaces here. Accounting edge cases
/// (flat EXIT, unrecognized signal kinds, duplicate order IDs) resolve locally.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PortfolioError {
    #[error("universe must contain at least one symbol")]
    EmptyUniverse,

    #[error("symbol {0} appears more than once in the universe")]
    DuplicateSymbol(String),

    #[error("symbol {0} is not part of the configured universe")]
    UnknownSymbol(String),

    #[error("initial capital must be positive and finite, got {0}")]
    NonPositiveCapital(f64),

    #[error("fill of {quantity} {symbol} would overflow the signed position")]
    QuantityOverflow { symbol: String, quantity: u64 },

    #[error("fill for {symbol} has invalid {field}: {value}")]
    InvalidFill {
        symbol: String,
        field: &'static str,
        value: f64,
    },

    #[error("market data has no bar for {0}")]
    NoBar(String),

    #[error("market data has no {field} for {symbol}")]
    MissingMarketData { symbol: String, field: BarField },

    #[error("bar at {supplied} precedes last recorded bar at {last}")]
    OutOfOrderBar {
        supplied: DateTime<Utc>,
        last: DateTime<Utc>,
    },
}
