use async_trait::async_trait;

use super::models::{LineItemUpdate, NewLineItem};
use showcase_core::dsp::{ExternalBudget, LineItem};
use showcase_core::errors::Result;

/// Raw DSP operations, scoped to one advertiser account
#[async_trait]
pub trait DspApiClientTrait: Send + Sync {
    async fn get_campaign_budget(&self, external_id: &str) -> Result<ExternalBudget>;

    /// Overwrites the campaign's impression budget.
    async fn set_campaign_budget(&self, external_id: &str, impressions: i64)
        -> Result<ExternalBudget>;

    async fn list_line_items(&self, external_id: &str) -> Result<Vec<LineItem>>;

    async fn create_line_item(&self, external_id: &str, item: NewLineItem) -> Result<LineItem>;

    async fn update_line_item(&self, line_item_id: &str, update: LineItemUpdate)
        -> Result<LineItem>;
}
