//! Performance reporting over a finished (or in-progress) run.
//!
//! Reads the snapshot history and the order registry; never mutates the engine.
//! Tables come out as in-memory polars `DataFrame`s for an external
//! presentation layer.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use polars::prelude::{Column, DataFrame, DataType, TimeUnit};
use quantbook_core::domain::Universe;
use quantbook_core::engine::{LedgerPortfolio, OrderRegistry, SnapshotHistory};
use quantbook_core::sizers::OrderSizer;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BARS_PER_YEAR, DEFAULT_BAR_HOURS};
use crate::metrics::{self, Drawdowns};
use crate::summary::{SummaryStats, TradeStats};

/// Bar-frequency parameters for annualization and duration conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub bars_per_year: f64,
    pub bar_hours: f64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            bars_per_year: DEFAULT_BARS_PER_YEAR,
            bar_hours: DEFAULT_BAR_HOURS,
        }
    }
}

/// One row of the equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub total: f64,
    /// `None` on the first row.
    pub returns: Option<f64>,
    pub equity_curve: f64,
    pub drawdown: f64,
}

/// The derived equity series plus its drawdown extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    pub points: Vec<EquityPoint>,
    pub max_drawdown: f64,
    pub max_duration: usize,
}

impl EquityCurve {
    pub fn from_history(history: &SnapshotHistory) -> Self {
        let totals: Vec<f64> = history.holdings().iter().map(|h| h.total).collect();
        let returns = metrics::pct_returns(&totals);
        let equity = metrics::equity_curve(&returns);
        let Drawdowns {
            series,
            max_drawdown,
            max_duration,
        } = metrics::drawdowns(&equity);

        let points = history
            .holdings()
            .iter()
            .zip(returns)
            .zip(equity)
            .zip(series)
            .map(|(((h, r), eq), dd)| EquityPoint {
                timestamp: h.timestamp,
                total: h.total,
                returns: r,
                equity_curve: eq,
                drawdown: dd,
            })
            .collect();

        Self {
            points,
            max_drawdown,
            max_duration,
        }
    }

    /// Defined per-bar returns, first bar excluded.
    pub fn defined_returns(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.returns).collect()
    }

    /// Last equity-curve value; 1.0 before any bar.
    pub fn total_return(&self) -> f64 {
        self.points.last().map_or(1.0, |p| p.equity_curve)
    }
}

pub struct PerformanceReporter<'a> {
    universe: &'a Universe,
    history: &'a SnapshotHistory,
    orders: &'a OrderRegistry,
    settings: ReportSettings,
}

impl<'a> PerformanceReporter<'a> {
    pub fn new(
        universe: &'a Universe,
        history: &'a SnapshotHistory,
        orders: &'a OrderRegistry,
        settings: ReportSettings,
    ) -> Self {
        Self {
            universe,
            history,
            orders,
            settings,
        }
    }

    pub fn from_portfolio<S: OrderSizer>(
        portfolio: &'a LedgerPortfolio<S>,
        settings: ReportSettings,
    ) -> Self {
        Self::new(
            portfolio.universe(),
            portfolio.history(),
            portfolio.orders(),
            settings,
        )
    }

    pub fn equity_curve(&self) -> EquityCurve {
        EquityCurve::from_history(self.history)
    }

    /// `{datetime, <symbols…>, cash, commission, total, returns, equity_curve, drawdown}`
    pub fn equity_frame(&self) -> Result<DataFrame> {
        let holdings = self.history.holdings();
        let curve = self.equity_curve();

        let mut columns = Vec::with_capacity(self.universe.len() + 7);
        columns.push(datetime_column(holdings.iter().map(|h| h.timestamp))?);
        for (i, symbol) in self.universe.symbols().iter().enumerate() {
            let values: Vec<f64> = holdings.iter().map(|h| h.values[i]).collect();
            columns.push(Column::new(symbol.as_str().into(), values));
        }
        let cash: Vec<f64> = holdings.iter().map(|h| h.cash).collect();
        let commission: Vec<f64> = holdings.iter().map(|h| h.commission).collect();
        let total: Vec<f64> = holdings.iter().map(|h| h.total).collect();
        let returns: Vec<Option<f64>> = curve.points.iter().map(|p| p.returns).collect();
        let equity: Vec<f64> = curve.points.iter().map(|p| p.equity_curve).collect();
        let drawdown: Vec<f64> = curve.points.iter().map(|p| p.drawdown).collect();

        columns.push(Column::new("cash".into(), cash));
        columns.push(Column::new("commission".into(), commission));
        columns.push(Column::new("total".into(), total));
        columns.push(Column::new("returns".into(), returns));
        columns.push(Column::new("equity_curve".into(), equity));
        columns.push(Column::new("drawdown".into(), drawdown));

        DataFrame::new(columns).context("Failed to build equity curve dataframe")
    }

    /// `{datetime, <symbols…>}`: signed quantity per instrument per bar.
    pub fn trade_history_frame(&self) -> Result<DataFrame> {
        let positions = self.history.positions();
        let mut columns = Vec::with_capacity(self.universe.len() + 1);
        columns.push(datetime_column(positions.iter().map(|p| p.timestamp))?);
        for (i, symbol) in self.universe.symbols().iter().enumerate() {
            let qty: Vec<i64> = positions.iter().map(|p| p.quantities[i]).collect();
            columns.push(Column::new(symbol.as_str().into(), qty));
        }
        DataFrame::new(columns).context("Failed to build trade history dataframe")
    }

    /// `{order_id, symbol, direction, quantity, order_type, profit}`, one row per id.
    pub fn order_history_frame(&self) -> Result<DataFrame> {
        let orders: Vec<_> = self.orders.orders().collect();
        let ids: Vec<u64> = orders.iter().map(|o| o.id.0).collect();
        let symbols: Vec<String> = orders.iter().map(|o| o.symbol.clone()).collect();
        let directions: Vec<String> = orders.iter().map(|o| o.direction.to_string()).collect();
        let quantities: Vec<u64> = orders.iter().map(|o| o.quantity).collect();
        let types: Vec<String> = orders.iter().map(|o| o.order_type.to_string()).collect();
        let profits: Vec<f64> = orders.iter().map(|o| o.profit).collect();

        DataFrame::new(vec![
            Column::new("order_id".into(), ids),
            Column::new("symbol".into(), symbols),
            Column::new("direction".into(), directions),
            Column::new("quantity".into(), quantities),
            Column::new("order_type".into(), types),
            Column::new("profit".into(), profits),
        ])
        .context("Failed to build order history dataframe")
    }

    pub fn summary_stats(&self) -> SummaryStats {
        let curve = self.equity_curve();
        let trades = TradeStats::from_orders(self.orders.orders());
        SummaryStats {
            total_return: curve.total_return(),
            sharpe: metrics::sharpe_ratio(&curve.defined_returns(), self.settings.bars_per_year),
            max_drawdown: curve.max_drawdown,
            drawdown_duration_bars: curve.max_duration,
            drawdown_duration_hours: curve.max_duration as f64 * self.settings.bar_hours,
            total_profit: trades.total_profit,
            gross_profit: trades.gross_profit,
            gross_loss: trades.gross_loss,
            trade_count: trades.trade_count,
            win_rate: trades.win_rate(),
        }
    }

    /// Labeled summary statistics, ready for display.
    pub fn summarize(&self) -> Vec<(String, String)> {
        let stats = self.summary_stats();
        tracing::debug!(
            trades = stats.trade_count,
            total_return = stats.total_return,
            max_drawdown = stats.max_drawdown,
            "summary computed"
        );
        stats.to_pairs()
    }
}

fn datetime_column(timestamps: impl Iterator<Item = DateTime<Utc>>) -> Result<Column> {
    let millis: Vec<i64> = timestamps.map(|t| t.timestamp_millis()).collect();
    Column::new("datetime".into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .context("Failed to cast datetime column")
}
