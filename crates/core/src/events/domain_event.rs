//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain events that can change how an organization's quota should be split.
///
/// Every event carries the organization it concerns. The runtime adapter
/// reacts to them by rebalancing that organization's campaigns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A payment for the organization's billing cycle was recorded.
    PaymentRecorded {
        org_id: String,
        transaction_id: String,
        amount: Decimal,
    },

    /// The organization switched to another plan (quota and price change).
    PlanChanged { org_id: String, plan_id: String },

    /// Campaigns were created, canceled, or otherwise changed.
    CampaignsChanged {
        org_id: String,
        campaign_ids: Vec<String>,
    },
}

impl DomainEvent {
    /// Creates a PaymentRecorded event.
    pub fn payment_recorded(org_id: String, transaction_id: String, amount: Decimal) -> Self {
        Self::PaymentRecorded {
            org_id,
            transaction_id,
            amount,
        }
    }

    /// Creates a PlanChanged event.
    pub fn plan_changed(org_id: String, plan_id: String) -> Self {
        Self::PlanChanged { org_id, plan_id }
    }

    /// Creates a CampaignsChanged event.
    pub fn campaigns_changed(org_id: String, campaign_ids: Vec<String>) -> Self {
        Self::CampaignsChanged {
            org_id,
            campaign_ids,
        }
    }

    /// Organization the event concerns.
    pub fn org_id(&self) -> &str {
        match self {
            Self::PaymentRecorded { org_id, .. }
            | Self::PlanChanged { org_id, .. }
            | Self::CampaignsChanged { org_id, .. } => org_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_domain_event_serialization() {
        let event =
            DomainEvent::payment_recorded("org1".to_string(), "txn_9".to_string(), dec!(300));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("payment_recorded"));

        let deserialized: DomainEvent = serde_json::from_str(&json).unwrap();
        match deserialized {
            DomainEvent::PaymentRecorded {
                org_id,
                transaction_id,
                amount,
            } => {
                assert_eq!(org_id, "org1");
                assert_eq!(transaction_id, "txn_9");
                assert_eq!(amount, dec!(300));
            }
            _ => panic!("Expected PaymentRecorded"),
        }
    }

    #[test]
    fn test_plan_changed_from_json() {
        let json = r#"{"type":"plan_changed","org_id":"org2","plan_id":"growth"}"#;
        let event: DomainEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            DomainEvent::plan_changed("org2".to_string(), "growth".to_string())
        );
        assert_eq!(event.org_id(), "org2");
    }

    #[test]
    fn test_org_id_for_every_variant() {
        let events = [
            DomainEvent::payment_recorded("o1".to_string(), "t".to_string(), dec!(1)),
            DomainEvent::plan_changed("o2".to_string(), "p".to_string()),
            DomainEvent::campaigns_changed("o3".to_string(), vec!["c1".to_string()]),
        ];
        let ids: Vec<&str> = events.iter().map(|e| e.org_id()).collect();
        assert_eq!(ids, vec!["o1", "o2", "o3"]);
    }
}
