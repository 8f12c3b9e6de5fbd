//! The portfolio: the trait the dispatch loop talks to, and the ledger-backed engine.

use super::accounting::{HoldingsLedger, PositionLedger};
use super::error::PortfolioError;
use super::order_registry::OrderRegistry;
use super::portfolio_update;
use super::snapshot::{HoldingsRecord, SnapshotHistory};
use super::state::{EngineConfig, EngineState};
use crate::data::MarketData;
use crate::domain::{BarField, Event, FillRecord, OrderEvent, SignalKind, Universe};
use crate::sizers::{NaiveSizer, OrderSizer};
use tracing::{debug, info, warn};

/// What the dispatch loop needs from any portfolio implementation.
///
/// Both methods accept any event and ignore kinds they do not handle.
pub trait Portfolio {
    /// Turn a signal event into zero or one order.
    fn update_signal(&mut self, event: &Event) -> Result<Option<OrderEvent>, PortfolioError>;

    /// Apply a fill event to positions and holdings.
    fn update_fill(&mut self, event: &Event) -> Result<(), PortfolioError>;
}

/// Ledger-backed portfolio parameterized by its sizing policy.
///
/// Owns the live ledgers, the snapshot history, the order registry and the
/// fill log for one run. Not internally synchronized: a multi-threaded host
/// wraps the whole value in a single lock.
#[derive(Debug, Clone)]
pub struct LedgerPortfolio<S = NaiveSizer> {
    config: EngineConfig,
    state: EngineState,
    sizer: S,
}

/// Constant-quantity portfolio with no risk management.
pub type NaivePortfolio = LedgerPortfolio<NaiveSizer>;

impl LedgerPortfolio<NaiveSizer> {
    pub fn new(config: EngineConfig) -> Result<Self, PortfolioError> {
        Self::with_sizer(config, NaiveSizer)
    }
}

impl<S: OrderSizer> LedgerPortfolio<S> {
    pub fn with_sizer(config: EngineConfig, sizer: S) -> Result<Self, PortfolioError> {
        config.validate()?;
        let state = EngineState::new(&config);
        info!(
            symbols = ?config.universe.symbols(),
            start = %config.start,
            initial_capital = config.initial_capital,
            sizer = sizer.name(),
            "portfolio initialised"
        );
        Ok(Self {
            config,
            state,
            sizer,
        })
    }

    /// Append one position and one holdings snapshot for the latest bar.
    ///
    /// The bar timestamp comes from the universe's first symbol. Each position
    /// is marked at its symbol's latest close; the positions used are those
    /// carried from earlier fills.
    pub fn update_timeindex(
        &mut self,
        market: &dyn MarketData,
    ) -> Result<&HoldingsRecord, PortfolioError> {
        let universe = &self.config.universe;
        let primary = universe.primary();
        let timestamp = market
            .latest_bar_timestamp(primary)
            .ok_or_else(|| PortfolioError::NoBar(primary.to_string()))?;

        let closes = universe
            .symbols()
            .iter()
            .map(|symbol| {
                market
                    .latest_bar_value(symbol, BarField::Close)
                    .ok_or_else(|| PortfolioError::MissingMarketData {
                        symbol: symbol.clone(),
                        field: BarField::Close,
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let state = &mut self.state;
        let record = state
            .history
            .advance_bar(timestamp, &closes, &state.positions, &state.holdings)?;
        state.holdings.remark(&record.values, record.total);

        debug!(
            timestamp = %record.timestamp,
            cash = record.cash,
            commission = record.commission,
            total = record.total,
            "bar snapshot"
        );
        Ok(record)
    }

    /// Apply several fill events in order, stopping at the first error.
    pub fn update_fills<'a, I>(&mut self, events: I) -> Result<(), PortfolioError>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        for event in events {
            self.update_fill(event)?;
        }
        Ok(())
    }

    /// Route one event and return the events it produces.
    ///
    /// Market events snapshot, signal events may yield one order, fill events
    /// update the ledgers. Order events belong to the execution side and are
    /// passed over.
    pub fn handle(
        &mut self,
        event: &Event,
        market: &dyn MarketData,
    ) -> Result<Vec<Event>, PortfolioError> {
        match event {
            Event::Market => {
                self.update_timeindex(market)?;
                Ok(Vec::new())
            }
            Event::Signal(_) => {
                let order = self.update_signal(event)?;
                Ok(order.map(Event::Order).into_iter().collect())
            }
            Event::Fill(_) => {
                self.update_fill(event)?;
                Ok(Vec::new())
            }
            Event::Order(_) => Ok(Vec::new()),
        }
    }

    pub fn universe(&self) -> &Universe {
        &self.config.universe
    }

    pub fn initial_capital(&self) -> f64 {
        self.config.initial_capital
    }

    pub fn positions(&self) -> &PositionLedger {
        &self.state.positions
    }

    pub fn holdings(&self) -> &HoldingsLedger {
        &self.state.holdings
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.state.history
    }

    pub fn orders(&self) -> &OrderRegistry {
        &self.state.orders
    }

    pub fn fills(&self) -> &[FillRecord] {
        &self.state.fills
    }

    /// Current signed position for `symbol`.
    pub fn position(&self, symbol: &str) -> Result<i64, PortfolioError> {
        let index = self.config.universe.index_of(symbol)?;
        Ok(self.state.positions.quantity(index))
    }
}

impl<S: OrderSizer> Portfolio for LedgerPortfolio<S> {
    fn update_signal(&mut self, event: &Event) -> Result<Option<OrderEvent>, PortfolioError> {
        let Event::Signal(signal) = event else {
            return Ok(None);
        };
        let position = match self.position(&signal.symbol) {
            Ok(position) => position,
            Err(err) => {
                warn!(symbol = %signal.symbol, "signal rejected: unknown symbol");
                return Err(err);
            }
        };

        let Some(intent) = self.sizer.size(position, signal) else {
            match signal.kind {
                SignalKind::Unrecognized => {
                    warn!(symbol = %signal.symbol, "unrecognized signal kind; no order")
                }
                _ => debug!(
                    symbol = %signal.symbol,
                    kind = %signal.kind,
                    position,
                    "signal produced no order"
                ),
            }
            return Ok(None);
        };

        let order = OrderEvent::market(
            self.state.id_gen.next_order_id(),
            signal.symbol.clone(),
            signal.timestamp,
            intent.quantity,
            intent.direction,
        );
        debug!(
            order_id = %order.id,
            symbol = %order.symbol,
            direction = %order.direction,
            quantity = order.quantity,
            "order generated"
        );
        Ok(Some(order))
    }

    fn update_fill(&mut self, event: &Event) -> Result<(), PortfolioError> {
        portfolio_update::on_fill(event, &self.config.universe, &mut self.state).map(|_| ())
    }
}
