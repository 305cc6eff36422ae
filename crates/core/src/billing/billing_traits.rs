use crate::billing::billing_model::BillingCycle;
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for reading an organization's billing cycle
#[async_trait]
pub trait BillingCycleLookupTrait: Send + Sync {
    /// Returns the cycle in progress.
    ///
    /// Fails with `Error::NotFound` when billing has not started yet.
    async fn current_cycle(&self, org_id: &str) -> Result<BillingCycle>;
}
