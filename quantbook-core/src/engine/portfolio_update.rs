//! Portfolio update: applies fills to the ledgers.
//!
//! A fill moves the position ledger, the holdings ledger (at the fill's own
//! price and commission), registers the originating order, and lands in the
//! fill log. The symbol, price, commission and resulting position are all
//! checked before anything is mutated, so a rejected fill leaves the state
//! exactly as it was.

use super::error::PortfolioError;
use super::state::EngineState;
use crate::domain::{Event, FillEvent, Universe};
use tracing::{debug, warn};

/// Apply a fill event. Non-fill events are ignored and return `Ok(false)`.
pub fn on_fill(
    event: &Event,
    universe: &Universe,
    state: &mut EngineState,
) -> Result<bool, PortfolioError> {
    match event {
        Event::Fill(fill) => apply_fill(fill, universe, state).map(|()| true),
        _ => Ok(false),
    }
}

/// Apply a single fill to positions, holdings, the order registry and the fill log.
pub fn apply_fill(
    fill: &FillEvent,
    universe: &Universe,
    state: &mut EngineState,
) -> Result<(), PortfolioError> {
    let index = match universe.index_of(&fill.symbol) {
        Ok(index) => index,
        Err(err) => {
            warn!(
                symbol = %fill.symbol,
                order_id = %fill.order.id,
                "fill rejected: unknown symbol"
            );
            return Err(err);
        }
    };
    check_amounts(fill)?;

    if state
        .positions
        .apply_fill(index, fill.direction, fill.quantity)
        .is_none()
    {
        warn!(
            symbol = %fill.symbol,
            order_id = %fill.order.id,
            quantity = fill.quantity,
            position = state.positions.quantity(index),
            "fill rejected: position overflow"
        );
        return Err(PortfolioError::QuantityOverflow {
            symbol: fill.symbol.clone(),
            quantity: fill.quantity,
        });
    }
    state
        .holdings
        .apply_fill(index, fill.signed_notional(), fill.commission);
    if state.orders.register(fill.order.clone()).is_some() {
        debug!(order_id = %fill.order.id, "order re-registered; keeping latest copy");
    }
    state.fills.push(fill.to_record());

    debug!(
        symbol = %fill.symbol,
        direction = %fill.direction,
        quantity = fill.quantity,
        price = fill.fill_price,
        commission = fill.commission,
        position = state.positions.quantity(index),
        cash = state.holdings.cash,
        "fill applied"
    );
    Ok(())
}

/// Fill price must be finite and non-negative; so must the commission.
fn check_amounts(fill: &FillEvent) -> Result<(), PortfolioError> {
    for (field, value) in [("fill_price", fill.fill_price), ("commission", fill.commission)] {
        if !value.is_finite() || value < 0.0 {
            warn!(
                symbol = %fill.symbol,
                order_id = %fill.order.id,
                field,
                value,
                "fill rejected: invalid amount"
            );
            return Err(PortfolioError::InvalidFill {
                symbol: fill.symbol.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, OrderEvent, OrderId};
    use crate::engine::state::EngineConfig;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 4, 0, 0).unwrap()
    }

    fn setup() -> (Universe, EngineState) {
        let universe = Universe::new(["X", "Y"]).unwrap();
        let config = EngineConfig::new(universe.clone(), ts());
        let state = EngineState::new(&config);
        (universe, state)
    }

    fn fill(
        symbol: &str,
        id: u64,
        direction: Direction,
        qty: u64,
        price: f64,
        commission: f64,
    ) -> FillEvent {
        FillEvent {
            timestamp: ts(),
            symbol: symbol.into(),
            exchange: "SIM".into(),
            quantity: qty,
            direction,
            fill_price: price,
            commission,
            order: OrderEvent::market(OrderId(id), symbol, ts(), qty, direction),
        }
    }

    #[test]
    fn buy_fill_updates_every_ledger() {
        let (universe, mut state) = setup();
        apply_fill(&fill("X", 1, Direction::Buy, 10, 50.0, 1.0), &universe, &mut state).unwrap();

        assert_eq!(state.positions.quantity(0), 10);
        assert_eq!(state.holdings.cash, 99_499.0);
        assert_eq!(state.holdings.commission, 1.0);
        assert_eq!(state.holdings.value(0), 500.0);
        assert_eq!(state.orders.len(), 1);
        assert_eq!(state.fills.len(), 1);
        assert_eq!(state.fills[0].order_id, OrderId(1));
    }

    #[test]
    fn round_trip_returns_to_flat() {
        let (universe, mut state) = setup();
        apply_fill(&fill("Y", 1, Direction::Buy, 5, 20.0, 0.5), &universe, &mut state).unwrap();
        apply_fill(&fill("Y", 2, Direction::Sell, 5, 22.0, 0.5), &universe, &mut state).unwrap();

        assert_eq!(state.positions.quantity(1), 0);
        // 100000 - (100 + 0.5) - (-110 + 0.5)
        assert_eq!(state.holdings.cash, 100_009.0);
        assert_eq!(state.holdings.commission, 1.0);
        assert_eq!(state.orders.len(), 2);
    }

    #[test]
    fn unknown_symbol_leaves_state_untouched() {
        let (universe, mut state) = setup();
        let before = state.clone();
        let err = apply_fill(&fill("Z", 1, Direction::Buy, 1, 1.0, 0.0), &universe, &mut state)
            .unwrap_err();
        assert_eq!(err, PortfolioError::UnknownSymbol("Z".into()));
        assert_eq!(state.positions, before.positions);
        assert_eq!(state.holdings, before.holdings);
        assert!(state.orders.is_empty());
        assert!(state.fills.is_empty());
    }

    #[test]
    fn quantity_beyond_i64_is_rejected_untouched() {
        let (universe, mut state) = setup();
        let before = state.clone();
        let huge = fill("X", 1, Direction::Buy, 1 << 63, 1.0, 0.0);
        let err = apply_fill(&huge, &universe, &mut state).unwrap_err();
        assert_eq!(
            err,
            PortfolioError::QuantityOverflow {
                symbol: "X".into(),
                quantity: 1 << 63,
            }
        );
        assert_eq!(state.positions, before.positions);
        assert_eq!(state.holdings, before.holdings);
        assert!(state.orders.is_empty());
        assert!(state.fills.is_empty());
    }

    #[test]
    fn position_overflow_is_rejected_untouched() {
        let (universe, mut state) = setup();
        let max = i64::MAX as u64;
        apply_fill(&fill("Y", 1, Direction::Buy, max, 0.0, 0.0), &universe, &mut state).unwrap();
        let before = state.clone();

        let err = apply_fill(&fill("Y", 2, Direction::Buy, 1, 1.0, 0.0), &universe, &mut state)
            .unwrap_err();
        assert!(matches!(err, PortfolioError::QuantityOverflow { quantity: 1, .. }));
        assert_eq!(state.positions.quantity(1), i64::MAX);
        assert_eq!(state.holdings, before.holdings);
        assert_eq!(state.orders.len(), 1);
        assert_eq!(state.fills.len(), 1);
    }

    #[test]
    fn invalid_price_or_commission_is_rejected_untouched() {
        let (universe, mut state) = setup();
        let before = state.clone();
        let bad = [
            (f64::NAN, 0.0, "fill_price"),
            (f64::INFINITY, 0.0, "fill_price"),
            (-1.0, 0.0, "fill_price"),
            (10.0, -0.5, "commission"),
            (10.0, f64::NAN, "commission"),
        ];
        for (price, commission, field) in bad {
            let err = apply_fill(
                &fill("X", 1, Direction::Buy, 1, price, commission),
                &universe,
                &mut state,
            )
            .unwrap_err();
            assert!(
                matches!(err, PortfolioError::InvalidFill { field: f, .. } if f == field),
                "{price} / {commission}: {err:?}"
            );
        }
        assert_eq!(state.positions, before.positions);
        assert_eq!(state.holdings, before.holdings);
        assert!(state.orders.is_empty());
        assert!(state.fills.is_empty());
    }

    #[test]
    fn zero_price_and_commission_are_accepted() {
        let (universe, mut state) = setup();
        apply_fill(&fill("X", 1, Direction::Buy, 3, 0.0, 0.0), &universe, &mut state).unwrap();
        assert_eq!(state.positions.quantity(0), 3);
        assert_eq!(state.holdings.cash, 100_000.0);
    }

    #[test]
    fn non_fill_events_are_ignored() {
        let (universe, mut state) = setup();
        assert!(!on_fill(&Event::Market, &universe, &mut state).unwrap());
        assert!(state.fills.is_empty());
    }

    #[test]
    fn fill_event_is_applied_through_on_fill() {
        let (universe, mut state) = setup();
        let event = Event::Fill(fill("X", 4, Direction::Sell, 3, 10.0, 0.0));
        assert!(on_fill(&event, &universe, &mut state).unwrap());
        assert_eq!(state.positions.quantity(0), -3);
    }
}
