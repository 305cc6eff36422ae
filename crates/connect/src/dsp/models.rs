use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use showcase_core::dsp::LineItemStatus;

/// Body of the budget write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub impressions: i64,
}

/// Line item to create under a DSP campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub name: String,
    pub status: LineItemStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Flight window change for an existing line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemUpdate {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
