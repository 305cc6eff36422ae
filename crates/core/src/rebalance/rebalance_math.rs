//! Quota split and money arithmetic used by the rebalance engine.
//!
//! Every rounding step goes through [`round_half_up`], which rounds midpoints
//! toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::rebalance_errors::RebalanceError;
use super::rebalance_model::{RebalancePlan, ResolvedMultipliers};
use crate::billing::BillingCycle;
use crate::campaigns::Campaign;
use crate::constants::{BUDGET_DECIMAL_PRECISION, COST_DECIMAL_PRECISION};

type MathResult<T> = std::result::Result<T, RebalanceError>;

/// Rounds to `dp` decimal places, midpoints toward positive infinity.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(dp, strategy)
}

/// Rounds to a whole number of users or impressions.
pub fn round_to_units(value: Decimal, what: &str) -> MathResult<i64> {
    round_half_up(value, 0)
        .to_i64()
        .ok_or_else(|| RebalanceError::Overflow(what.to_string()))
}

/// Share of the remaining quota each active campaign receives.
///
/// The shares sum to `remaining` within `active_count - 1` units.
pub fn quota_share(remaining: i64, active_count: usize) -> MathResult<i64> {
    if active_count == 0 {
        return Ok(0);
    }
    let share = Decimal::from(remaining)
        .checked_div(Decimal::from(active_count as u64))
        .ok_or_else(|| RebalanceError::Overflow("quota share".to_string()))?;
    round_to_units(share, "quota share")
}

/// Dollar amount matching `added_users` of the cycle's view quota, in cents.
pub fn budget_delta(added_users: i64, cycle: &BillingCycle) -> MathResult<Decimal> {
    if cycle.total_views <= 0 {
        return Err(RebalanceError::InvalidCycle(cycle.total_views));
    }
    let fraction = Decimal::from(added_users)
        .checked_div(Decimal::from(cycle.total_views))
        .ok_or_else(|| RebalanceError::Overflow("budget fraction".to_string()))?;
    let delta = fraction
        .checked_mul(cycle.amount)
        .ok_or_else(|| RebalanceError::Overflow("budget delta".to_string()))?;
    Ok(round_half_up(delta, BUDGET_DECIMAL_PRECISION))
}

/// Per-view cost for a freshly priced campaign.
///
/// `None` when the divisor is zero.
pub fn derive_cost(
    budget: Decimal,
    added_users: i64,
    internal_multiplier: Decimal,
) -> Option<Decimal> {
    let divisor = Decimal::from(added_users).checked_mul(internal_multiplier)?;
    if divisor.is_zero() {
        return None;
    }
    budget
        .checked_div(divisor)
        .map(|cost| round_half_up(cost, COST_DECIMAL_PRECISION))
}

/// DSP impressions matching `added_users`.
pub fn impression_delta(added_users: i64, external_multiplier: Decimal) -> MathResult<i64> {
    let impressions = Decimal::from(added_users)
        .checked_mul(external_multiplier)
        .ok_or_else(|| RebalanceError::Overflow("impression delta".to_string()))?;
    round_to_units(impressions, "impression delta")
}

/// Computes the new allocation of one active campaign.
///
/// `used` is the campaign's cycle consumption and `share` its slice of the
/// remaining quota. The existing cost is kept whenever it is set.
pub fn compute_plan(
    campaign: &Campaign,
    used: i64,
    share: i64,
    cycle: &BillingCycle,
    multipliers: &ResolvedMultipliers,
) -> MathResult<RebalancePlan> {
    let target_users = used
        .checked_add(share)
        .ok_or_else(|| RebalanceError::Overflow("target users".to_string()))?;
    let added_users = target_users
        .checked_sub(campaign.target_users.unwrap_or(0))
        .ok_or_else(|| RebalanceError::Overflow("added users".to_string()))?;

    let budget =
        campaign.pricing.budget.unwrap_or(Decimal::ZERO) + budget_delta(added_users, cycle)?;

    let cost = match campaign.pricing.cost {
        Some(cost) => cost,
        None => derive_cost(budget, added_users, multipliers.internal).ok_or_else(|| {
            RebalanceError::UndefinedCost {
                campaign_id: campaign.id.clone(),
                added_users,
                internal_multiplier: multipliers.internal,
            }
        })?,
    };

    Ok(RebalancePlan {
        campaign_id: campaign.id.clone(),
        used,
        target_users,
        added_users,
        budget,
        cost,
        external_impression_delta: impression_delta(added_users, multipliers.external)?,
    })
}
