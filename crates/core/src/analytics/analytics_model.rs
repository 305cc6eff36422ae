use serde::{Deserialize, Serialize};

/// Cumulative views a campaign has fulfilled in the current cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub campaign_id: String,
    pub cycle_users: i64,
}
