//! QuantBook Runner: reporting and run configuration on top of `quantbook-core`.
//!
//! This crate provides:
//! - TOML run configuration with validation and a content-addressed run id
//! - Performance metrics (returns, equity curve, Sharpe, drawdowns)
//! - Equity-curve, trade-history and order-history tables as polars frames
//! - Summary statistics

pub mod config;
pub mod metrics;
pub mod reporter;
pub mod summary;

pub use config::{BacktestConfig, ConfigError, RunId};
pub use metrics::{drawdowns, sharpe_ratio, Drawdowns};
pub use reporter::{EquityCurve, EquityPoint, PerformanceReporter, ReportSettings};
pub use summary::{SummaryStats, TradeStats};
