//! Showcase Connect - HTTP adapters for the rebalance engine.
//!
//! This crate implements the `showcase-core` traits over the platform APIs
//! (campaigns, billing, analytics) and the DSP advertiser API.

pub mod client;
pub mod dsp;
pub mod platform;

// Re-export commonly used types
pub use client::{ApiClient, DEFAULT_TIMEOUT_SECS};
pub use dsp::{DspApiClient, DspApiClientTrait, DspSyncService};
pub use platform::{AnalyticsApiClient, BillingApiClient, CampaignApiClient};
