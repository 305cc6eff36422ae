use crate::campaigns::campaigns_model::{Campaign, CampaignQuery, CampaignUpdate};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for campaign repository operations
///
/// Implementations talk to the remote campaign store. There is no optimistic
/// concurrency: an update overwrites whatever fields it carries.
#[async_trait]
pub trait CampaignRepositoryTrait: Send + Sync {
    async fn list(&self, query: &CampaignQuery) -> Result<Vec<Campaign>>;

    /// Applies a partial update and returns the stored campaign.
    ///
    /// Fails with `Error::NotFound` or `Error::Validation`.
    async fn update(&self, campaign_id: &str, patch: CampaignUpdate) -> Result<Campaign>;
}
