//! QuantBook Core: portfolio accounting for an event-driven bar backtest.
//!
//! This crate contains the engine:
//! - Domain types (bars, signals, orders, fills, events, universe)
//! - Market-data seam and an in-memory bar replay
//! - Position and holdings ledgers with bar-boundary mark-to-market snapshots
//! - Order sizing policies
//! - Fill application and the order registry

pub mod data;
pub mod domain;
pub mod engine;
pub mod sizers;

pub use engine::{EngineConfig, NaivePortfolio, Portfolio, PortfolioError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine types are Send + Sync, so a threaded host can
    /// hold one portfolio behind a single Mutex.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::Event>();
        require_sync::<domain::Event>();
        require_send::<domain::FillRecord>();
        require_sync::<domain::FillRecord>();
        require_send::<domain::Universe>();
        require_sync::<domain::Universe>();

        // Engine types
        require_send::<engine::NaivePortfolio>();
        require_sync::<engine::NaivePortfolio>();
        require_send::<engine::SnapshotHistory>();
        require_sync::<engine::SnapshotHistory>();
        require_send::<engine::OrderRegistry>();
        require_sync::<engine::OrderRegistry>();
        require_send::<PortfolioError>();
        require_sync::<PortfolioError>();

        // Market data
        require_send::<data::BarTape>();
        require_sync::<data::BarTape>();
    }

    /// Architecture contract: sizers see only the position and the signal.
    ///
    /// `OrderSizer::size` takes `i64` and `&SignalEvent`; if a ledger parameter is
    /// ever added, every implementation breaks.
    #[test]
    fn sizer_trait_has_no_ledger_parameter() {
        fn _check_trait_object_builds(
            sizer: &dyn sizers::OrderSizer,
            signal: &domain::SignalEvent,
        ) -> Option<sizers::OrderIntent> {
            sizer.size(0, signal)
        }
    }

    /// Architecture contract: the Portfolio trait has exactly the signal and fill entry points.
    #[test]
    fn portfolio_trait_is_object_safe() {
        fn _check_trait_object_builds(
            portfolio: &mut dyn Portfolio,
            event: &domain::Event,
        ) -> Result<(), PortfolioError> {
            portfolio.update_signal(event)?;
            portfolio.update_fill(event)
        }
    }
}
