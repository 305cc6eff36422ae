use async_trait::async_trait;

use super::models::{BudgetUpdate, LineItemUpdate, NewLineItem};
use super::traits::DspApiClientTrait;
use crate::client::{segment, ApiClient};
use showcase_core::dsp::{ExternalBudget, LineItem};
use showcase_core::errors::Result;

/// HTTP client for the DSP advertiser API.
#[derive(Debug, Clone)]
pub struct DspApiClient {
    api: ApiClient,
    advertiser_id: String,
}

impl DspApiClient {
    pub fn new(api: ApiClient, advertiser_id: &str) -> Self {
        Self {
            api: api.with_label("DspApi"),
            advertiser_id: advertiser_id.to_string(),
        }
    }

    fn campaign_path(&self, external_id: &str) -> String {
        format!(
            "/v1/advertisers/{}/campaigns/{}",
            segment(&self.advertiser_id),
            segment(external_id)
        )
    }

    fn line_item_path(&self, line_item_id: &str) -> String {
        format!(
            "/v1/advertisers/{}/line-items/{}",
            segment(&self.advertiser_id),
            segment(line_item_id)
        )
    }
}

#[async_trait]
impl DspApiClientTrait for DspApiClient {
    async fn get_campaign_budget(&self, external_id: &str) -> Result<ExternalBudget> {
        self.api.get(&self.campaign_path(external_id)).await
    }

    async fn set_campaign_budget(
        &self,
        external_id: &str,
        impressions: i64,
    ) -> Result<ExternalBudget> {
        let path = format!("{}/budget", self.campaign_path(external_id));
        self.api.put(&path, &BudgetUpdate { impressions }).await
    }

    async fn list_line_items(&self, external_id: &str) -> Result<Vec<LineItem>> {
        let path = format!("{}/line-items", self.campaign_path(external_id));
        self.api.get(&path).await
    }

    async fn create_line_item(&self, external_id: &str, item: NewLineItem) -> Result<LineItem> {
        let path = format!("{}/line-items", self.campaign_path(external_id));
        self.api.post(&path, &item).await
    }

    async fn update_line_item(
        &self,
        line_item_id: &str,
        update: LineItemUpdate,
    ) -> Result<LineItem> {
        self.api.put(&self.line_item_path(line_item_id), &update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DspApiClient {
        let api = ApiClient::new("https://dsp.example/", "token", None).unwrap();
        DspApiClient::new(api, "adv-1")
    }

    #[test]
    fn test_paths_are_scoped_to_advertiser() {
        let client = client();
        assert_eq!(
            client.campaign_path("dsp 9"),
            "/v1/advertisers/adv-1/campaigns/dsp%209"
        );
        assert_eq!(
            client.line_item_path("li-3"),
            "/v1/advertisers/adv-1/line-items/li-3"
        );
    }
}
