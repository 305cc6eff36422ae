use async_trait::async_trait;

use super::dsp_model::{ActiveLineItemsRequest, ExternalBudget, LineItemUpsertResult};
use crate::campaigns::Campaign;
use crate::errors::Result;

/// DSP capabilities the rebalance engine drives after a campaign is persisted
#[async_trait]
pub trait DspSyncTrait: Send + Sync {
    /// Shifts the campaign's external impression budget by `impression_delta`.
    ///
    /// Returns the external budget before and after the change.
    async fn adjust_campaign_budget(
        &self,
        campaign: &Campaign,
        impression_delta: i64,
    ) -> Result<(ExternalBudget, ExternalBudget)>;

    /// Makes the campaign's active line items cover the requested window.
    async fn upsert_campaign_active_line_items(
        &self,
        request: ActiveLineItemsRequest,
    ) -> Result<LineItemUpsertResult>;
}
