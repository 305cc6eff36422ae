//! Campaigns module - domain models and repository trait.

mod campaigns_model;
mod campaigns_traits;

pub use campaigns_model::{
    Campaign, CampaignPricing, CampaignQuery, CampaignStatus, CampaignUpdate,
    ConversionMultipliers,
};
pub use campaigns_traits::CampaignRepositoryTrait;
