//! Event planning for domain event batches.

use std::collections::HashSet;

use showcase_core::events::DomainEvent;

/// Organizations to rebalance for a batch of domain events.
///
/// Each organization appears once, in the order it was first seen.
/// Events without an organization id are ignored.
pub fn plan_rebalance_orgs(events: &[DomainEvent]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut org_ids = Vec::new();

    for event in events {
        let org_id = event.org_id().trim();
        if org_id.is_empty() {
            continue;
        }
        if seen.insert(org_id) {
            org_ids.push(org_id.to_string());
        }
    }

    org_ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plan_deduplicates_in_first_seen_order() {
        let events = vec![
            DomainEvent::plan_changed("org-b".to_string(), "growth".to_string()),
            DomainEvent::payment_recorded("org-a".to_string(), "txn_1".to_string(), dec!(300)),
            DomainEvent::campaigns_changed("org-b".to_string(), vec!["c1".to_string()]),
            DomainEvent::campaigns_changed("org-c".to_string(), vec![]),
            DomainEvent::payment_recorded("org-a".to_string(), "txn_2".to_string(), dec!(50)),
        ];

        assert_eq!(plan_rebalance_orgs(&events), vec!["org-b", "org-a", "org-c"]);
    }

    #[test]
    fn test_plan_skips_blank_org_ids() {
        let events = vec![
            DomainEvent::plan_changed(" ".to_string(), "growth".to_string()),
            DomainEvent::campaigns_changed(String::new(), vec!["c1".to_string()]),
        ];

        assert!(plan_rebalance_orgs(&events).is_empty());
    }

    #[test]
    fn test_plan_empty_batch() {
        assert!(plan_rebalance_orgs(&[]).is_empty());
    }
}
