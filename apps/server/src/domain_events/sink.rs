//! Web domain event sink implementation.
//!
//! Receives domain events and sends them to a background queue worker
//! for debounced processing.

use std::sync::{Arc, Mutex};

use showcase_core::{
    events::{DomainEvent, DomainEventSink},
    rebalance::RebalanceServiceTrait,
};
use tokio::sync::mpsc;

use super::queue_worker::event_queue_worker;

/// Domain event sink for the web server runtime.
///
/// Sends events to a background worker that debounces them and rebalances
/// the affected organizations.
///
/// The sink accepts events as soon as it is created. They are buffered in the
/// channel until `start_worker()` spawns the worker.
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl WebDomainEventSink {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Spawns the background worker on the current tokio runtime.
    ///
    /// Returns false when the worker was already started.
    pub fn start_worker(&self, rebalance_service: Arc<dyn RebalanceServiceTrait>) -> bool {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(rx) = rx else {
            tracing::warn!("Domain event queue worker already started");
            return false;
        };

        tokio::spawn(event_queue_worker(rx, rebalance_service));
        true
    }

    #[cfg(test)]
    pub fn with_sender(tx: mpsc::UnboundedSender<DomainEvent>) -> Self {
        Self {
            tx,
            rx: Mutex::new(None),
        }
    }
}

impl Default for WebDomainEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        // Best-effort: a closed channel drops the event.
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Failed to emit domain event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_sends_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = WebDomainEventSink::with_sender(tx);

        sink.emit(DomainEvent::plan_changed(
            "org1".to_string(),
            "growth".to_string(),
        ));

        let event = rx.try_recv().unwrap();
        match event {
            DomainEvent::PlanChanged { org_id, plan_id } => {
                assert_eq!(org_id, "org1");
                assert_eq!(plan_id, "growth");
            }
            _ => panic!("Expected PlanChanged event"),
        }
    }

    #[test]
    fn test_sink_batch_sends_all_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = WebDomainEventSink::with_sender(tx);

        sink.emit_batch(vec![
            DomainEvent::campaigns_changed("org1".to_string(), vec!["c1".to_string()]),
            DomainEvent::campaigns_changed("org2".to_string(), vec!["c2".to_string()]),
        ]);

        assert_eq!(rx.try_recv().unwrap().org_id(), "org1");
        assert_eq!(rx.try_recv().unwrap().org_id(), "org2");
    }

    #[test]
    fn test_emit_after_receiver_dropped_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let sink = WebDomainEventSink::with_sender(tx);

        sink.emit(DomainEvent::plan_changed("org1".to_string(), "p".to_string()));
    }
}
