//! DSP-side models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::campaigns::Campaign;

/// Impression budget of a campaign inside the DSP account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalBudget {
    pub external_id: String,
    pub impressions: i64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Scheduling state of a DSP line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemStatus {
    Active,
    Paused,
    Archived,
    #[serde(other)]
    Unknown,
}

/// DSP-side schedulable ad-buy unit belonging to a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub campaign_external_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: LineItemStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl LineItem {
    pub fn is_active(&self) -> bool {
        self.status == LineItemStatus::Active
    }
}

/// Flight window the campaign's active line items should cover
#[derive(Debug, Clone)]
pub struct ActiveLineItemsRequest {
    pub campaign: Campaign,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Line items touched by an upsert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemUpsertResult {
    pub created_line_items: Vec<LineItem>,
    pub updated_line_items: Vec<LineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_line_item_status() {
        let json = r#"{
            "id": "li-1",
            "campaignExternalId": "dsp-1",
            "status": "pending_review",
            "startDate": "2026-10-01T00:00:00Z",
            "endDate": "2026-10-31T00:00:00Z"
        }"#;

        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.status, LineItemStatus::Unknown);
        assert!(!item.is_active());
    }
}
