use async_trait::async_trait;

use crate::client::{segment, ApiClient};
use showcase_core::billing::{BillingCycle, BillingCycleLookupTrait};
use showcase_core::errors::Result;

/// Reads the organization's current billing cycle.
///
/// A 404 from the API surfaces as `Error::NotFound`, which the engine treats
/// as "billing has not started".
#[derive(Debug, Clone)]
pub struct BillingApiClient {
    api: ApiClient,
}

impl BillingApiClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn current_cycle_path(org_id: &str) -> String {
    format!(
        "/v1/organizations/{}/billing-cycles/current",
        segment(org_id)
    )
}

#[async_trait]
impl BillingCycleLookupTrait for BillingApiClient {
    async fn current_cycle(&self, org_id: &str) -> Result<BillingCycle> {
        self.api.get(&current_cycle_path(org_id)).await
    }
}
