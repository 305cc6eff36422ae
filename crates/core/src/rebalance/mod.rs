//! Rebalance module - splits an organization's monthly view quota and budget
//! across its active app campaigns and pushes the result to the DSP.

mod rebalance_errors;
pub mod rebalance_math;
mod rebalance_model;
mod rebalance_service;
mod rebalance_traits;


pub use rebalance_errors::RebalanceError;
pub use rebalance_model::{
    CampaignOutcomeSummary, CampaignRebalanceOutcome, ConversionMultiplierDefaults,
    RebalanceConfig, RebalancePlan, RebalanceReport, RebalanceSummary, ResolvedMultipliers,
    SyncStage, ZeroAllocationPolicy,
};
pub use rebalance_service::RebalanceService;
pub use rebalance_traits::RebalanceServiceTrait;
