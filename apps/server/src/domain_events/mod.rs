//! Domain events runtime bridge for the web server.
//!
//! Receives domain events via DomainEventSink, debounces them, and rebalances
//! every organization the batch touched.
//!
//! Events are debounced with a 1-second window and processed directly
//! by the queue worker, one organization at a time.

mod planner;
mod queue_worker;
mod sink;

pub use sink::WebDomainEventSink;
