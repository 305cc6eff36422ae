use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::models::{LineItemUpdate, NewLineItem};
use super::traits::DspApiClientTrait;
use showcase_core::campaigns::Campaign;
use showcase_core::dsp::{
    ActiveLineItemsRequest, DspSyncTrait, ExternalBudget, LineItemStatus, LineItemUpsertResult,
};
use showcase_core::errors::{Error, Result, ValidationError};

/// Keeps a campaign's DSP budget and flight window in line with the platform.
pub struct DspSyncService {
    api: Arc<dyn DspApiClientTrait>,
}

impl DspSyncService {
    pub fn new(api: Arc<dyn DspApiClientTrait>) -> Self {
        Self { api }
    }
}

fn external_id(campaign: &Campaign) -> Result<&str> {
    campaign
        .external_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            Error::Validation(ValidationError::MissingField(format!(
                "externalId (campaign {})",
                campaign.id
            )))
        })
}

fn line_item_name(campaign: &Campaign, request: &ActiveLineItemsRequest) -> String {
    let label = campaign.name.as_deref().unwrap_or(&campaign.id);
    format!("{} {}", label, request.start_date.format("%Y-%m-%d"))
}

#[async_trait]
impl DspSyncTrait for DspSyncService {
    async fn adjust_campaign_budget(
        &self,
        campaign: &Campaign,
        impression_delta: i64,
    ) -> Result<(ExternalBudget, ExternalBudget)> {
        let external_id = external_id(campaign)?;
        let before = self.api.get_campaign_budget(external_id).await?;

        // The DSP rejects negative budgets.
        let impressions = before.impressions.saturating_add(impression_delta).max(0);
        debug!(
            "[DspSync] Campaign {} ({}): {} {:+} -> {}",
            campaign.id, external_id, before.impressions, impression_delta, impressions
        );

        let after = self.api.set_campaign_budget(external_id, impressions).await?;
        Ok((before, after))
    }

    async fn upsert_campaign_active_line_items(
        &self,
        request: ActiveLineItemsRequest,
    ) -> Result<LineItemUpsertResult> {
        let campaign = &request.campaign;
        let external_id = external_id(campaign)?;
        let items = self.api.list_line_items(external_id).await?;

        let mut result = LineItemUpsertResult::default();
        let mut has_active = false;
        for item in items.iter().filter(|item| item.is_active()) {
            has_active = true;
            if item.start_date == request.start_date && item.end_date == request.end_date {
                continue;
            }
            let updated = self
                .api
                .update_line_item(
                    &item.id,
                    LineItemUpdate {
                        start_date: request.start_date,
                        end_date: request.end_date,
                    },
                )
                .await?;
            result.updated_line_items.push(updated);
        }

        if !has_active {
            let created = self
                .api
                .create_line_item(
                    external_id,
                    NewLineItem {
                        name: line_item_name(campaign, &request),
                        status: LineItemStatus::Active,
                        start_date: request.start_date,
                        end_date: request.end_date,
                    },
                )
                .await?;
            info!(
                "[DspSync] Campaign {} had no active line item, created {}",
                campaign.id, created.id
            );
            result.created_line_items.push(created);
        }

        Ok(result)
    }
}
