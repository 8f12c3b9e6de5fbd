//! Engine configuration and mutable state.

use super::accounting::{HoldingsLedger, PositionLedger};
use super::error::PortfolioError;
use super::order_registry::OrderRegistry;
use super::snapshot::SnapshotHistory;
use crate::domain::{FillRecord, IdGen, Universe};
use chrono::{DateTime, Utc};

/// Starting capital when none is configured.
pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;

/// Configuration for a single backtest run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub universe: Universe,
    /// Timestamp of the seed snapshot, before any bar is processed.
    pub start: DateTime<Utc>,
    pub initial_capital: f64,
}

impl EngineConfig {
    pub fn new(universe: Universe, start: DateTime<Utc>) -> Self {
        Self {
            universe,
            start,
            initial_capital: DEFAULT_INITIAL_CAPITAL,
        }
    }

    pub fn with_initial_capital(mut self, initial_capital: f64) -> Self {
        self.initial_capital = initial_capital;
        self
    }

    pub fn validate(&self) -> Result<(), PortfolioError> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(PortfolioError::NonPositiveCapital(self.initial_capital));
        }
        Ok(())
    }
}

/// Everything the portfolio mutates during a run.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub positions: PositionLedger,
    pub holdings: HoldingsLedger,
    pub history: SnapshotHistory,
    pub orders: OrderRegistry,
    pub fills: Vec<FillRecord>,
    pub id_gen: IdGen,
}

impl EngineState {
    pub fn new(config: &EngineConfig) -> Self {
        let n = config.universe.len();
        Self {
            positions: PositionLedger::flat(n),
            holdings: HoldingsLedger::new(n, config.initial_capital),
            history: SnapshotHistory::seeded(config.start, n, config.initial_capital),
            orders: OrderRegistry::new(),
            fills: Vec::new(),
            id_gen: IdGen::default(),
        }
    }
}
