//! Summary statistics for a finished run.

use quantbook_core::domain::OrderEvent;
use serde::{Deserialize, Serialize};

/// Profit tallies over the order history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_profit: f64,
    /// Sum of strictly positive profits.
    pub gross_profit: f64,
    /// Sum of strictly negative profits (≤ 0).
    pub gross_loss: f64,
    pub trade_count: usize,
    pub winners: usize,
}

impl TradeStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a OrderEvent>) -> Self {
        orders.into_iter().fold(Self::default(), |mut acc, order| {
            let p = order.profit;
            acc.total_profit += p;
            acc.trade_count += 1;
            if p > 0.0 {
                acc.gross_profit += p;
                acc.winners += 1;
            } else if p < 0.0 {
                acc.gross_loss += p;
            }
            acc
        })
    }

    /// Fraction of orders with positive profit; `None` with no orders.
    pub fn win_rate(&self) -> Option<f64> {
        (self.trade_count > 0).then(|| self.winners as f64 / self.trade_count as f64)
    }
}

/// Everything `summarize` reports, in typed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Last equity-curve value (1.0 = break-even).
    pub total_return: f64,
    pub sharpe: Option<f64>,
    /// Most negative drawdown fraction (≤ 0).
    pub max_drawdown: f64,
    pub drawdown_duration_bars: usize,
    pub drawdown_duration_hours: f64,
    pub total_profit: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub trade_count: usize,
    pub win_rate: Option<f64>,
}

impl SummaryStats {
    /// Ordered (label, value) pairs for display.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let rows = [
            (
                "Total Return",
                format!("{:.2}%", (self.total_return - 1.0) * 100.0),
            ),
            ("Sharpe Ratio", fmt_opt(self.sharpe, |s| format!("{s:.2}"))),
            (
                "Max Drawdown",
                format!("{:.2}%", self.max_drawdown * 100.0),
            ),
            (
                "Drawdown Duration",
                format!(
                    "{} bars ({:.1} hours)",
                    self.drawdown_duration_bars, self.drawdown_duration_hours
                ),
            ),
            ("Total Profit", format!("{:.1}", self.total_profit)),
            ("Gross Profit", format!("{:.1}", self.gross_profit)),
            ("Gross Loss", format!("{:.1}", self.gross_loss)),
            ("Trade Count", self.trade_count.to_string()),
            (
                "Win Rate",
                fmt_opt(self.win_rate, |w| format!("{:.1}%", w * 100.0)),
            ),
        ];
        rows.into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect()
    }
}

fn fmt_opt(value: Option<f64>, f: impl Fn(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| "n/a".to_string())
}
