//! Serializable backtest configuration.
//!
//! A `BacktestConfig` carries everything the engine and the reporter need:
//! the symbol universe, the start timestamp, initial capital, and the bar
//! frequency used to annualize Sharpe and convert drawdown durations.

use std::path::Path;

use chrono::{DateTime, Utc};
use quantbook_core::domain::Universe;
use quantbook_core::engine::{EngineConfig, DEFAULT_INITIAL_CAPITAL};
use quantbook_core::PortfolioError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reporter::ReportSettings;

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Six 4-hour bars per trading day, 252 trading days.
pub const DEFAULT_BARS_PER_YEAR: f64 = 252.0 * 6.0;

/// Hours covered by one bar.
pub const DEFAULT_BAR_HOURS: f64 = 4.0;

/// Column names the equity report reserves; no symbol may use them.
pub const RESERVED_COLUMNS: [&str; 7] = [
    "datetime",
    "cash",
    "commission",
    "total",
    "returns",
    "equity_curve",
    "drawdown",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("engine rejected config: {0}")]
    Engine(#[from] PortfolioError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration for one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestConfig {
    /// Ordered symbol list; the first is the primary symbol.
    pub symbols: Vec<String>,

    /// Timestamp of the seed snapshot (before the first bar).
    pub start: DateTime<Utc>,

    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    /// Bars per year, for Sharpe annualization.
    #[serde(default = "default_bars_per_year")]
    pub bars_per_year: f64,

    /// Hours per bar, for drawdown duration in hours.
    #[serde(default = "default_bar_hours")]
    pub bar_hours: f64,
}

fn default_initial_capital() -> f64 {
    DEFAULT_INITIAL_CAPITAL
}

fn default_bars_per_year() -> f64 {
    DEFAULT_BARS_PER_YEAR
}

fn default_bar_hours() -> f64 {
    DEFAULT_BAR_HOURS
}

impl BacktestConfig {
    pub fn new(symbols: Vec<String>, start: DateTime<Utc>) -> Self {
        Self {
            symbols,
            start,
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            bars_per_year: DEFAULT_BARS_PER_YEAR,
            bar_hours: DEFAULT_BAR_HOURS,
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(s) = self
            .symbols
            .iter()
            .find(|s| RESERVED_COLUMNS.contains(&s.as_str()))
        {
            return Err(ConfigError::Invalid(format!(
                "symbol '{s}' collides with a report column name"
            )));
        }
        if !(self.bars_per_year.is_finite() && self.bars_per_year > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bars_per_year must be positive, got {}",
                self.bars_per_year
            )));
        }
        if !(self.bar_hours.is_finite() && self.bar_hours > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bar_hours must be positive, got {}",
                self.bar_hours
            )));
        }
        self.engine_config()?;
        Ok(())
    }

    /// Builds the engine configuration; universe and capital checks happen here.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let universe = Universe::new(self.symbols.iter().cloned())?;
        let config =
            EngineConfig::new(universe, self.start).with_initial_capital(self.initial_capital);
        config.validate()?;
        Ok(config)
    }

    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            bars_per_year: self.bars_per_year,
            bar_hours: self.bar_hours,
        }
    }

    /// Deterministic hash of the canonical JSON form.
    pub fn run_id(&self) -> Result<RunId, ConfigError> {
        let json = serde_json::to_vec(self)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}
