use async_trait::async_trait;
use log::debug;

use crate::client::{segment, ApiClient};
use showcase_core::campaigns::{Campaign, CampaignQuery, CampaignRepositoryTrait, CampaignUpdate};
use showcase_core::errors::Result;

/// Campaign store backed by the platform campaign API.
#[derive(Debug, Clone)]
pub struct CampaignApiClient {
    api: ApiClient,
}

impl CampaignApiClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

pub(crate) fn list_path(query: &CampaignQuery) -> String {
    format!(
        "/v1/campaigns?org={}&application={}",
        segment(&query.org),
        segment(&query.application)
    )
}

pub(crate) fn update_path(campaign_id: &str) -> String {
    format!("/v1/campaigns/{}", segment(campaign_id))
}

#[async_trait]
impl CampaignRepositoryTrait for CampaignApiClient {
    async fn list(&self, query: &CampaignQuery) -> Result<Vec<Campaign>> {
        let campaigns: Vec<Campaign> = self.api.get(&list_path(query)).await?;
        debug!(
            "[CampaignApi] Listed {} campaign(s) for org {}",
            campaigns.len(),
            query.org
        );
        Ok(campaigns)
    }

    async fn update(&self, campaign_id: &str, patch: CampaignUpdate) -> Result<Campaign> {
        debug!("[CampaignApi] Updating campaign {}", campaign_id);
        self.api.patch(&update_path(campaign_id), &patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path() {
        let query = CampaignQuery::showcase("org 7");
        assert_eq!(
            list_path(&query),
            "/v1/campaigns?org=org%207&application=showcase"
        );
    }

    #[test]
    fn test_update_path() {
        assert_eq!(update_path("c42"), "/v1/campaigns/c42");
    }
}
