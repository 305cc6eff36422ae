use async_trait::async_trait;

use super::rebalance_model::RebalanceReport;
use crate::campaigns::Campaign;
use crate::errors::Result;

/// Trait for redistributing an organization's view quota across its campaigns
#[async_trait]
pub trait RebalanceServiceTrait: Send + Sync {
    /// Rebalances every active app campaign of the organization.
    ///
    /// Fails as soon as any campaign chain fails. The call is not atomic:
    /// campaigns updated before the failure keep their new allocation.
    async fn rebalance(&self, org_id: &str) -> Result<Vec<Campaign>>;

    /// Same run as [`rebalance`](Self::rebalance), reporting each campaign's
    /// outcome instead of collapsing them into one result.
    async fn rebalance_report(&self, org_id: &str) -> Result<RebalanceReport>;
}
