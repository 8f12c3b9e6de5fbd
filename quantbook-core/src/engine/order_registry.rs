//! Order registry: the orders that produced fills, kept for profit attribution.

use crate::domain::{OrderEvent, OrderId};
use std::collections::BTreeMap;

/// Maps order ID to the most recent copy of that order seen on a fill.
///
/// Iteration is in ascending ID order. Re-registering an ID replaces the stored
/// order (the latest fill carries the latest realized profit).
#[derive(Debug, Clone, Default)]
pub struct OrderRegistry {
    orders: BTreeMap<OrderId, OrderEvent>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `order`, returning the order it replaced, if any.
    pub fn register(&mut self, order: OrderEvent) -> Option<OrderEvent> {
        self.orders.insert(order.id, order)
    }

    pub fn get(&self, id: OrderId) -> Option<&OrderEvent> {
        self.orders.get(&id)
    }

    pub fn orders(&self) -> impl Iterator<Item = &OrderEvent> {
        self.orders.values()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
