use crate::analytics::analytics_model::AnalyticsSnapshot;
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for reading campaign consumption from the analytics service
#[async_trait]
pub trait AnalyticsReaderTrait: Send + Sync {
    async fn cycle_usage(&self, campaign_id: &str) -> Result<AnalyticsSnapshot>;
}
