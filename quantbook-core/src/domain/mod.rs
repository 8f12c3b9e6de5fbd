//! Domain types for QuantBook

pub mod bar;
pub mod event;
pub mod fill;
pub mod ids;
pub mod order;
pub mod signal;
pub mod universe;

pub use bar::{Bar, BarField};
pub use event::{Event, EventKind};
pub use fill::{FillEvent, FillRecord};
pub use ids::{IdGen, OrderId};
pub use order::{Direction, OrderEvent, OrderType};
pub use signal::{SignalEvent, SignalKind};
pub use universe::Universe;
