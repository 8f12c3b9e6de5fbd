//! Snapshot history: one position record and one holdings record per bar.
//!
//! Records are append-only. Index 0 of each sequence is the seed state at the
//! run's start timestamp; every later index is one processed market event.

use super::accounting::{HoldingsLedger, PositionLedger};
use super::error::PortfolioError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Positions held at a bar boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub timestamp: DateTime<Utc>,
    /// Signed quantity per instrument, in universe order.
    pub quantities: Vec<i64>,
}

/// Mark-to-market holdings at a bar boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsRecord {
    pub timestamp: DateTime<Utc>,
    /// Market value per instrument, in universe order.
    pub values: Vec<f64>,
    pub cash: f64,
    pub commission: f64,
    /// Always `cash + values.sum()`.
    pub total: f64,
}

/// Two parallel, append-only record sequences sharing timestamps index for index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHistory {
    positions: Vec<PositionRecord>,
    holdings: Vec<HoldingsRecord>,
}

impl SnapshotHistory {
    /// Seed the history with the state before any bar: flat, all cash.
    pub fn seeded(start: DateTime<Utc>, instruments: usize, initial_capital: f64) -> Self {
        Self {
            positions: vec![PositionRecord {
                timestamp: start,
                quantities: vec![0; instruments],
            }],
            holdings: vec![HoldingsRecord {
                timestamp: start,
                values: vec![0.0; instruments],
                cash: initial_capital,
                commission: 0.0,
                total: initial_capital,
            }],
        }
    }

    /// Snapshot the live ledgers at `timestamp`, marking each position at `closes`.
    ///
    /// `closes` is in universe order. The positions marked are those carried into
    /// this bar: fills produced from this bar's signals land after the snapshot.
    /// Returns the appended holdings record.
    pub fn advance_bar(
        &mut self,
        timestamp: DateTime<Utc>,
        closes: &[f64],
        positions: &PositionLedger,
        holdings: &HoldingsLedger,
    ) -> Result<&HoldingsRecord, PortfolioError> {
        let last = self.last_timestamp();
        if timestamp < last {
            return Err(PortfolioError::OutOfOrderBar {
                supplied: timestamp,
                last,
            });
        }
        debug_assert_eq!(closes.len(), positions.quantities().len());

        let values: Vec<f64> = positions
            .quantities()
            .iter()
            .zip(closes)
            .map(|(&qty, &close)| qty as f64 * close)
            .collect();
        let total = holdings.cash + values.iter().sum::<f64>();

        self.positions.push(PositionRecord {
            timestamp,
            quantities: positions.quantities().to_vec(),
        });
        self.holdings.push(HoldingsRecord {
            timestamp,
            values,
            cash: holdings.cash,
            commission: holdings.commission,
            total,
        });
        let appended = self.holdings.len() - 1;
        Ok(&self.holdings[appended])
    }

    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    pub fn holdings(&self) -> &[HoldingsRecord] {
        &self.holdings
    }

    /// Number of records in each sequence, seed included.
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Never true: the seed record is always present.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn last_timestamp(&self) -> DateTime<Utc> {
        self.holdings
            .last()
            .map(|h| h.timestamp)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn last_holdings(&self) -> &HoldingsRecord {
        &self.holdings[self.holdings.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn seed_records_share_start_timestamp() {
        let history = SnapshotHistory::seeded(start(), 2, 100_000.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.positions()[0].timestamp, start());
        assert_eq!(history.holdings()[0].timestamp, start());
        assert_eq!(history.positions()[0].quantities, vec![0, 0]);
        assert_eq!(history.holdings()[0].cash, 100_000.0);
        assert_eq!(history.holdings()[0].total, 100_000.0);
        assert_eq!(history.holdings()[0].commission, 0.0);
    }

    #[test]
    fn advance_marks_carried_positions_at_close() {
        let mut history = SnapshotHistory::seeded(start(), 2, 100_000.0);
        let mut positions = PositionLedger::flat(2);
        let mut holdings = HoldingsLedger::new(2, 100_000.0);
        positions.apply_fill(0, Direction::Buy, 10);
        holdings.apply_fill(0, 500.0, 1.0);
        positions.apply_fill(1, Direction::Sell, 3);
        holdings.apply_fill(1, -60.0, 0.0);

        let ts = start() + Duration::hours(4);
        let rec = history
            .advance_bar(ts, &[55.0, 21.0], &positions, &holdings)
            .unwrap()
            .clone();

        assert_eq!(rec.values, vec![550.0, -63.0]);
        assert_eq!(rec.cash, 100_000.0 - 501.0 + 60.0);
        assert_eq!(rec.total, rec.cash + 550.0 - 63.0);
        assert_eq!(history.positions()[1].quantities, vec![10, -3]);
        assert_eq!(history.positions()[1].timestamp, ts);
    }

    #[test]
    fn rejects_bar_before_last() {
        let mut history = SnapshotHistory::seeded(start(), 1, 1_000.0);
        let positions = PositionLedger::flat(1);
        let holdings = HoldingsLedger::new(1, 1_000.0);
        let early = start() - Duration::hours(1);
        let err = history
            .advance_bar(early, &[1.0], &positions, &holdings)
            .unwrap_err();
        assert!(matches!(err, PortfolioError::OutOfOrderBar { .. }));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn earlier_records_are_untouched_by_later_bars() {
        let mut history = SnapshotHistory::seeded(start(), 1, 1_000.0);
        let mut positions = PositionLedger::flat(1);
        let holdings = HoldingsLedger::new(1, 1_000.0);
        history
            .advance_bar(start() + Duration::hours(4), &[10.0], &positions, &holdings)
            .unwrap();
        let first = history.holdings()[1].clone();
        positions.apply_fill(0, Direction::Buy, 5);
        history
            .advance_bar(start() + Duration::hours(8), &[12.0], &positions, &holdings)
            .unwrap();
        assert_eq!(history.holdings()[1], first);
        assert_eq!(history.holdings()[2].values, vec![60.0]);
    }
}
