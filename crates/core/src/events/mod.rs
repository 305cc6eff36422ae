//! Domain events module.
//!
//! Provides the events that trigger a rebalance and the sink trait used to
//! publish them. Runtime adapters implement the sink to queue events for the
//! worker that calls the rebalance engine.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
