//! Billing cycle domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of an organization's current monthly billing cycle.
///
/// Fetched fresh for every rebalance; never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingCycle {
    pub cycle_start: DateTime<Utc>,
    pub cycle_end: DateTime<Utc>,
    /// Monthly view quota shared by all eligible campaigns
    pub total_views: i64,
    /// Dollars billed for the cycle
    pub amount: Decimal,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_billing_cycle_deserialization() {
        let json = r#"{
            "cycleStart": "2026-10-01T00:00:00Z",
            "cycleEnd": "2026-10-31T23:59:59Z",
            "totalViews": 2000,
            "amount": 300,
            "transactionId": "txn_1"
        }"#;

        let cycle: BillingCycle = serde_json::from_str(json).unwrap();
        assert_eq!(
            cycle.cycle_start,
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(cycle.total_views, 2000);
        assert_eq!(cycle.amount, dec!(300));
        assert_eq!(cycle.transaction_id.as_deref(), Some("txn_1"));
    }
}
