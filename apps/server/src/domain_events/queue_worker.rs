//! Event queue worker for processing domain events.
//!
//! Receives events from an mpsc channel, debounces them with a 1s window,
//! then rebalances each affected organization.

use std::sync::Arc;
use std::time::Duration;

use showcase_core::{events::DomainEvent, rebalance::RebalanceServiceTrait};
use tokio::sync::mpsc;

use super::planner::plan_rebalance_orgs;

/// Debounce window for collecting events before processing.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(1000);

/// Runs the event queue worker.
///
/// Batches are processed inline, so a new batch never starts while the
/// previous one is still rebalancing. Events arriving meanwhile stay queued
/// in the channel and join the next batch.
pub async fn event_queue_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    rebalance_service: Arc<dyn RebalanceServiceTrait>,
) {
    tracing::info!("Domain event queue worker started");

    let mut pending_events: Vec<DomainEvent> = Vec::new();

    loop {
        if !pending_events.is_empty() {
            tokio::select! {
                event = rx.recv() => {
                    match event {
                        Some(e) => pending_events.push(e),
                        None => {
                            // Channel closed, process remaining and exit
                            process_event_batch(&pending_events, rebalance_service.as_ref()).await;
                            tracing::info!("Domain event queue worker shutting down");
                            return;
                        }
                    }
                }
                _ = tokio::time::sleep(DEBOUNCE_DURATION) => {
                    let batch = std::mem::take(&mut pending_events);
                    process_event_batch(&batch, rebalance_service.as_ref()).await;
                }
            }
        } else {
            match rx.recv().await {
                Some(e) => pending_events.push(e),
                None => {
                    tracing::info!("Domain event queue worker shutting down");
                    return;
                }
            }
        }
    }
}

/// Rebalances every organization of the batch, sequentially.
///
/// Failures are logged and never stop the remaining organizations.
pub(crate) async fn process_event_batch(
    events: &[DomainEvent],
    rebalance_service: &dyn RebalanceServiceTrait,
) {
    let org_ids = plan_rebalance_orgs(events);
    tracing::info!(
        "Processing batch of {} domain event(s) for {} organization(s)",
        events.len(),
        org_ids.len()
    );

    for org_id in org_ids {
        match rebalance_service.rebalance_report(&org_id).await {
            Ok(report) => {
                let summary = report.summary();
                if summary.failed > 0 {
                    tracing::warn!(
                        "Rebalance run {} for org {} finished with {} failed campaign(s) of {}",
                        summary.run_id,
                        org_id,
                        summary.failed,
                        summary.campaigns.len()
                    );
                } else {
                    tracing::info!(
                        "Rebalance run {} for org {} finished: {} campaign(s), short_circuited={}",
                        summary.run_id,
                        org_id,
                        summary.campaigns.len(),
                        summary.short_circuited
                    );
                }
            }
            Err(e) => {
                tracing::warn!("Rebalance failed for org {}: {}", org_id, e);
            }
        }
    }
}
