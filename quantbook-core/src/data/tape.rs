//! BarTape: replays a fixed set of bars one timestamp at a time.

use super::MarketData;
use crate::domain::{Bar, BarField};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// In-memory bar replay.
///
/// Bars are grouped by timestamp and released in ascending order by
/// [`BarTape::advance`]. A symbol with no bar at a step keeps its previous one.
#[derive(Debug, Clone)]
pub struct BarTape {
    steps: Vec<Vec<Bar>>,
    cursor: usize,
    latest: HashMap<String, Bar>,
}

impl BarTape {
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        let mut steps: Vec<Vec<Bar>> = Vec::new();
        for bar in bars {
            match steps.last_mut() {
                Some(step) if step[0].timestamp == bar.timestamp => step.push(bar),
                _ => steps.push(vec![bar]),
            }
        }
        Self {
            steps,
            cursor: 0,
            latest: HashMap::new(),
        }
    }

    /// Release the next timestamp's bars. Returns false once the tape is exhausted.
    pub fn advance(&mut self) -> bool {
        let Some(step) = self.steps.get(self.cursor) else {
            return false;
        };
        for bar in step {
            self.latest.insert(bar.symbol.clone(), bar.clone());
        }
        self.cursor += 1;
        true
    }

    /// Number of timestamps still to be released.
    pub fn remaining(&self) -> usize {
        self.steps.len() - self.cursor
    }

    pub fn latest_bar(&self, symbol: &str) -> Option<&Bar> {
        self.latest.get(symbol)
    }
}

impl MarketData for BarTape {
    fn latest_bar_timestamp(&self, symbol: &str) -> Option<DateTime<Utc>> {
        self.latest.get(symbol).map(|b| b.timestamp)
    }

    fn latest_bar_value(&self, symbol: &str, field: BarField) -> Option<f64> {
        self.latest.get(symbol).map(|b| b.value(field))
    }
}
