use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{segment, ApiClient};
use showcase_core::analytics::{AnalyticsReaderTrait, AnalyticsSnapshot};
use showcase_core::errors::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CycleUsageResponse {
    #[serde(default)]
    cycle_users: i64,
}

/// Reads per-campaign consumption from the analytics service.
#[derive(Debug, Clone)]
pub struct AnalyticsApiClient {
    api: ApiClient,
}

impl AnalyticsApiClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AnalyticsReaderTrait for AnalyticsApiClient {
    async fn cycle_usage(&self, campaign_id: &str) -> Result<AnalyticsSnapshot> {
        let path = format!(
            "/v1/analytics/campaigns/{}/cycle-usage",
            segment(campaign_id)
        );
        let usage: CycleUsageResponse = self.api.get(&path).await?;
        Ok(AnalyticsSnapshot {
            campaign_id: campaign_id.to_string(),
            cycle_users: usage.cycle_users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_usage_defaults_to_zero() {
        let usage: CycleUsageResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(usage.cycle_users, 0);

        let usage: CycleUsageResponse = serde_json::from_str(r#"{"cycleUsers": 412}"#).unwrap();
        assert_eq!(usage.cycle_users, 412);
    }
}
