//! Platform API adapters - campaign store, billing and analytics.

mod analytics;
mod billing;
mod campaigns;

pub use analytics::AnalyticsApiClient;
pub use billing::BillingApiClient;
pub use campaigns::CampaignApiClient;
