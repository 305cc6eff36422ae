use rust_decimal::Decimal;
use thiserror::Error;

/// Typed failures of the rebalance computation itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RebalanceError {
    /// Cost has to be derived but the divisor `added_users * internal` is zero.
    #[error(
        "Cost for campaign {campaign_id} is undefined: {added_users} added users with internal multiplier {internal_multiplier}"
    )]
    UndefinedCost {
        campaign_id: String,
        added_users: i64,
        internal_multiplier: Decimal,
    },

    /// An active campaign has no analytics snapshot. Active campaigns are a
    /// subset of the eligible ones, so this is a broken reader contract.
    #[error("No analytics snapshot for active campaign {0}")]
    MissingUsage(String),

    #[error("Billing cycle has a non-positive view quota: {0}")]
    InvalidCycle(i64),

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(String),
}
