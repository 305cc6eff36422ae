//! Domain event sink trait.

use super::DomainEvent;

/// Receives domain events that may require a rebalance.
///
/// `emit()` must not block: implementations queue the event and leave the
/// rebalancing to a worker. Emission is best-effort and never fails the
/// publisher.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    /// Emits each event in order.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CollectingSink {
        org_ids: Mutex<Vec<String>>,
    }

    impl DomainEventSink for CollectingSink {
        fn emit(&self, event: DomainEvent) {
            self.org_ids.lock().unwrap().push(event.org_id().to_string());
        }
    }

    #[test]
    fn test_emit_batch_preserves_order() {
        let sink = CollectingSink::default();

        sink.emit(DomainEvent::plan_changed("org1".to_string(), "pro".to_string()));
        sink.emit_batch(vec![
            DomainEvent::campaigns_changed("org2".to_string(), vec!["c1".to_string()]),
            DomainEvent::plan_changed("org3".to_string(), "pro".to_string()),
        ]);

        assert_eq!(*sink.org_ids.lock().unwrap(), vec!["org1", "org2", "org3"]);
    }
}
