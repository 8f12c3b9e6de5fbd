//! Signal events emitted by a strategy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the strategy wants done with a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    /// Open or add to a long position.
    Long,
    /// Open or add to a short position.
    Short,
    /// Flatten whatever is held.
    Exit,
    /// Any tag this engine does not know. Never produces an order.
    #[serde(other)]
    Unrecognized,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
            Self::Exit => "EXIT",
            Self::Unrecognized => "UNRECOGNIZED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub kind: SignalKind,
    /// Units to trade for LONG/SHORT. Ignored by EXIT.
    pub quantity: u64,
}

impl SignalEvent {
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        kind: SignalKind,
        quantity: u64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            kind,
            quantity,
        }
    }
}
