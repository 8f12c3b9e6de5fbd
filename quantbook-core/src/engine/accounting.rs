//! Live ledgers: signed position per instrument, and cash/commission/value totals.
//!
//! Both ledgers are column vectors indexed by universe position. Symbol
//! resolution happens once, in the caller, before either ledger is touched.

use crate::domain::Direction;
use serde::{Deserialize, Serialize};

/// Current signed quantity per instrument. Mutated only by fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLedger {
    quantities: Vec<i64>,
}

impl PositionLedger {
    pub fn flat(instruments: usize) -> Self {
        Self {
            quantities: vec![0; instruments],
        }
    }

    /// Add `direction.sign() * quantity` to the instrument at `index`.
    ///
    /// Returns the new position, or `None` (ledger unchanged) when the
    /// quantity or the resulting position does not fit in an `i64`.
    pub fn apply_fill(&mut self, index: usize, direction: Direction, quantity: u64) -> Option<i64> {
        let next = direction
            .signed(quantity)
            .and_then(|delta| self.quantities[index].checked_add(delta))?;
        self.quantities[index] = next;
        Some(next)
    }

    pub fn quantity(&self, index: usize) -> i64 {
        self.quantities[index]
    }

    pub fn quantities(&self) -> &[i64] {
        &self.quantities
    }
}

/// Current cash, cumulative commission, per-instrument value, and total equity.
///
/// Fills move cash and commission; bar snapshots re-mark `values` and `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsLedger {
    values: Vec<f64>,
    pub cash: f64,
    pub commission: f64,
    pub total: f64,
}

impl HoldingsLedger {
    pub fn new(instruments: usize, initial_capital: f64) -> Self {
        Self {
            values: vec![0.0; instruments],
            cash: initial_capital,
            commission: 0.0,
            total: initial_capital,
        }
    }

    /// Book a fill's signed notional and commission.
    ///
    /// cash and total both drop by `notional + commission`; no bound is
    /// placed on negative cash or short exposure.
    pub fn apply_fill(&mut self, index: usize, notional: f64, commission: f64) {
        self.values[index] += notional;
        self.commission += commission;
        self.cash -= notional + commission;
        self.total -= notional + commission;
    }

    /// Replace per-instrument values with a fresh mark and recompute total.
    pub(crate) fn remark(&mut self, values: &[f64], total: f64) {
        self.values.copy_from_slice(values);
        self.total = total;
    }

    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_then_sell_returns_to_flat() {
        let mut positions = PositionLedger::flat(2);
        assert_eq!(positions.apply_fill(1, Direction::Buy, 10), Some(10));
        assert_eq!(positions.quantity(1), 10);
        assert_eq!(positions.apply_fill(1, Direction::Sell, 10), Some(0));
        assert_eq!(positions.quantity(1), 0);
        assert_eq!(positions.quantity(0), 0);
    }

    #[test]
    fn short_positions_are_allowed() {
        let mut positions = PositionLedger::flat(1);
        positions.apply_fill(0, Direction::Sell, 7);
        assert_eq!(positions.quantity(0), -7);
    }

    #[test]
    fn overflowing_fill_leaves_position_unchanged() {
        let mut positions = PositionLedger::flat(1);
        assert_eq!(positions.apply_fill(0, Direction::Buy, 1 << 63), None);
        assert_eq!(positions.quantity(0), 0);

        let max = i64::MAX as u64;
        assert_eq!(positions.apply_fill(0, Direction::Buy, max), Some(i64::MAX));
        assert_eq!(positions.apply_fill(0, Direction::Buy, 1), None);
        assert_eq!(positions.quantity(0), i64::MAX);

        let mut short = PositionLedger::flat(1);
        short.apply_fill(0, Direction::Sell, max);
        assert_eq!(short.apply_fill(0, Direction::Sell, 2), None);
        assert_eq!(short.quantity(0), -i64::MAX);
    }

    #[test]
    fn buy_fill_moves_cash_and_commission() {
        let mut holdings = HoldingsLedger::new(1, 100_000.0);
        holdings.apply_fill(0, 500.0, 1.0);
        assert_eq!(holdings.cash, 99_499.0);
        assert_eq!(holdings.commission, 1.0);
        assert_eq!(holdings.total, 99_499.0);
        assert_eq!(holdings.value(0), 500.0);
    }

    #[test]
    fn sell_fill_credits_cash_less_commission() {
        let mut holdings = HoldingsLedger::new(1, 10_000.0);
        holdings.apply_fill(0, -100.0, 2.5);
        // cash -= (-100 + 2.5)
        assert_eq!(holdings.cash, 10_097.5);
        assert_eq!(holdings.value(0), -100.0);
        assert_eq!(holdings.commission, 2.5);
    }

    #[test]
    fn cash_may_go_negative() {
        let mut holdings = HoldingsLedger::new(1, 1_000.0);
        holdings.apply_fill(0, 5_000.0, 0.0);
        assert_eq!(holdings.cash, -4_000.0);
    }

    #[test]
    fn remark_replaces_values() {
        let mut holdings = HoldingsLedger::new(2, 1_000.0);
        holdings.remark(&[10.0, -5.0], 1_005.0);
        assert_eq!(holdings.values(), &[10.0, -5.0]);
        assert_eq!(holdings.total, 1_005.0);
        assert_eq!(holdings.cash, 1_000.0);
    }
}
