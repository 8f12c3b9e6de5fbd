//! Portfolio accounting engine: ledgers, bar snapshots, fill application.
//!
//! The engine is driven one event at a time by an external dispatch loop:
//!
//! 1. Market event: snapshot positions and mark holdings at the latest close
//! 2. Signal event: size zero or one order from the current position
//! 3. Fill event: update positions, cash, commission; register the order
//!
//! All fills from a bar's signals must arrive before the next market event.

pub mod accounting;
pub mod error;
pub mod order_registry;
pub mod portfolio;
pub mod portfolio_update;
pub mod snapshot;
pub mod state;

pub use accounting::{HoldingsLedger, PositionLedger};
pub use error::PortfolioError;
pub use order_registry::OrderRegistry;
pub use portfolio::{LedgerPortfolio, NaivePortfolio, Portfolio};
pub use portfolio_update::{apply_fill, on_fill};
pub use snapshot::{HoldingsRecord, PositionRecord, SnapshotHistory};
pub use state::{EngineConfig, EngineState, DEFAULT_INITIAL_CAPITAL};
