//! The event envelope exchanged between the dispatch loop and the portfolio.

use super::fill::FillEvent;
use super::order::OrderEvent;
use super::signal::SignalEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Market,
    Signal,
    Order,
    Fill,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Market => "MARKET",
            Self::Signal => "SIGNAL",
            Self::Order => "ORDER",
            Self::Fill => "FILL",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// New bar available. Timestamp and prices come from the market-data source.
    Market,
    Signal(SignalEvent),
    Order(OrderEvent),
    Fill(FillEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Market => EventKind::Market,
            Self::Signal(_) => EventKind::Signal,
            Self::Order(_) => EventKind::Order,
            Self::Fill(_) => EventKind::Fill,
        }
    }
}
