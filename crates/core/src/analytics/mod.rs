//! Analytics module - per-campaign consumption snapshots.

mod analytics_model;
mod analytics_traits;

pub use analytics_model::AnalyticsSnapshot;
pub use analytics_traits::AnalyticsReaderTrait;
