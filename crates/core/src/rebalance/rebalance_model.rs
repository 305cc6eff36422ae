//! Rebalance configuration, plan and report models.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rebalance_errors::RebalanceError;
use crate::billing::BillingCycle;
use crate::campaigns::{Campaign, CampaignPricing, CampaignUpdate};
use crate::constants::COST_PER_VIEW_MODEL;
use crate::dsp::{ExternalBudget, LineItemUpsertResult};
use crate::errors::{Error, Result};

/// Organization-wide conversion multipliers used when a campaign has no override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMultiplierDefaults {
    pub internal: Decimal,
    pub external: Decimal,
}

impl Default for ConversionMultiplierDefaults {
    fn default() -> Self {
        Self {
            internal: dec!(1),
            external: dec!(1),
        }
    }
}

/// What to do with a campaign whose cost must be derived from zero added users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroAllocationPolicy {
    /// Leave the campaign untouched and report it as skipped.
    #[default]
    Skip,
    /// Fail the campaign with `RebalanceError::UndefinedCost`.
    Reject,
}

impl FromStr for ZeroAllocationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown zero allocation policy '{}'",
                other
            ))),
        }
    }
}

/// Configuration for the rebalance engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceConfig {
    pub default_multipliers: ConversionMultiplierDefaults,
    pub zero_allocation_policy: ZeroAllocationPolicy,
}

impl RebalanceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_multipliers.internal <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "default internal multiplier must be positive, got {}",
                self.default_multipliers.internal
            )));
        }
        if self.default_multipliers.external <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "default external multiplier must be positive, got {}",
                self.default_multipliers.external
            )));
        }
        Ok(())
    }

    /// Campaign override first, then the configured default.
    pub fn resolve_multipliers(&self, campaign: &Campaign) -> ResolvedMultipliers {
        let overrides = campaign.conversion_multipliers.as_ref();
        ResolvedMultipliers {
            internal: overrides
                .and_then(|m| m.internal)
                .unwrap_or(self.default_multipliers.internal),
            external: overrides
                .and_then(|m| m.external)
                .unwrap_or(self.default_multipliers.external),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMultipliers {
    pub internal: Decimal,
    pub external: Decimal,
}

/// New allocation computed for one active campaign. Never persisted as such.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancePlan {
    pub campaign_id: String,
    pub used: i64,
    pub target_users: i64,
    pub added_users: i64,
    pub budget: Decimal,
    pub cost: Decimal,
    pub external_impression_delta: i64,
}

impl RebalancePlan {
    /// Patch carrying the plan on top of the campaign's current pricing.
    pub fn to_update(&self, current: &CampaignPricing) -> CampaignUpdate {
        CampaignUpdate {
            target_users: Some(self.target_users),
            pricing: Some(CampaignPricing {
                model: COST_PER_VIEW_MODEL.to_string(),
                cost: Some(self.cost),
                budget: Some(self.budget),
                daily_limit: current.daily_limit,
            }),
        }
    }
}

/// Step of a campaign chain. Steps run strictly in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Plan,
    Update,
    BudgetAdjust,
    LineItems,
}

impl SyncStage {
    /// Whether the campaign record was already written when this stage failed.
    pub fn is_persisted(&self) -> bool {
        matches!(self, SyncStage::BudgetAdjust | SyncStage::LineItems)
    }
}

/// Result of one campaign's chain.
#[derive(Debug)]
pub enum CampaignRebalanceOutcome {
    Updated {
        campaign: Campaign,
        plan: RebalancePlan,
        budget_before: ExternalBudget,
        budget_after: ExternalBudget,
        line_items: LineItemUpsertResult,
    },
    /// Left untouched under `ZeroAllocationPolicy::Skip`.
    Skipped {
        campaign: Campaign,
        reason: RebalanceError,
    },
    /// Returned as-is because no billing cycle is running.
    Unchanged { campaign: Campaign },
    Failed {
        campaign_id: String,
        stage: SyncStage,
        error: Error,
    },
}

impl CampaignRebalanceOutcome {
    pub fn campaign_id(&self) -> &str {
        match self {
            Self::Updated { campaign, .. }
            | Self::Skipped { campaign, .. }
            | Self::Unchanged { campaign } => &campaign.id,
            Self::Failed { campaign_id, .. } => campaign_id,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    fn summary(&self) -> CampaignOutcomeSummary {
        let mut summary = CampaignOutcomeSummary {
            campaign_id: self.campaign_id().to_string(),
            status: "",
            target_users: None,
            added_users: None,
            budget: None,
            cost: None,
            impression_delta: None,
            line_items_created: 0,
            line_items_updated: 0,
            persisted: false,
            message: None,
        };
        match self {
            Self::Updated {
                plan, line_items, ..
            } => {
                summary.status = "updated";
                summary.target_users = Some(plan.target_users);
                summary.added_users = Some(plan.added_users);
                summary.budget = Some(plan.budget);
                summary.cost = Some(plan.cost);
                summary.impression_delta = Some(plan.external_impression_delta);
                summary.line_items_created = line_items.created_line_items.len();
                summary.line_items_updated = line_items.updated_line_items.len();
                summary.persisted = true;
            }
            Self::Skipped { reason, .. } => {
                summary.status = "skipped";
                summary.message = Some(reason.to_string());
            }
            Self::Unchanged { .. } => {
                summary.status = "unchanged";
            }
            Self::Failed { stage, error, .. } => {
                summary.status = "failed";
                summary.persisted = stage.is_persisted();
                summary.message = Some(format!("{:?}: {}", stage, error));
            }
        }
        summary
    }
}

/// Everything one rebalance run produced, one outcome per active campaign.
#[derive(Debug)]
pub struct RebalanceReport {
    pub run_id: Uuid,
    pub org_id: String,
    /// `None` when the run short-circuited for lack of a billing cycle.
    pub cycle: Option<BillingCycle>,
    pub fulfilled: i64,
    pub remaining: i64,
    pub outcomes: Vec<CampaignRebalanceOutcome>,
}

impl RebalanceReport {
    pub(crate) fn unchanged(run_id: Uuid, org_id: &str, campaigns: Vec<Campaign>) -> Self {
        Self {
            run_id,
            org_id: org_id.to_string(),
            cycle: None,
            fulfilled: 0,
            remaining: 0,
            outcomes: campaigns
                .into_iter()
                .map(|campaign| CampaignRebalanceOutcome::Unchanged { campaign })
                .collect(),
        }
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Folds the report into the campaign list, failing on the first failed chain.
    ///
    /// Campaigns whose chains completed before the failure stay updated remotely.
    pub fn into_campaigns(self) -> Result<Vec<Campaign>> {
        let mut campaigns = Vec::with_capacity(self.outcomes.len());
        for outcome in self.outcomes {
            match outcome {
                CampaignRebalanceOutcome::Updated { campaign, .. }
                | CampaignRebalanceOutcome::Skipped { campaign, .. }
                | CampaignRebalanceOutcome::Unchanged { campaign } => campaigns.push(campaign),
                CampaignRebalanceOutcome::Failed { error, .. } => return Err(error),
            }
        }
        Ok(campaigns)
    }

    pub fn summary(&self) -> RebalanceSummary {
        RebalanceSummary {
            run_id: self.run_id.to_string(),
            org_id: self.org_id.clone(),
            short_circuited: self.cycle.is_none(),
            fulfilled: self.fulfilled,
            remaining: self.remaining,
            failed: self.failed_count(),
            campaigns: self.outcomes.iter().map(|o| o.summary()).collect(),
        }
    }
}

/// Serializable view of a [`RebalanceReport`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceSummary {
    pub run_id: String,
    pub org_id: String,
    pub short_circuited: bool,
    pub fulfilled: i64,
    pub remaining: i64,
    pub failed: usize,
    pub campaigns: Vec<CampaignOutcomeSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignOutcomeSummary {
    pub campaign_id: String,
    pub status: &'static str,
    pub target_users: Option<i64>,
    pub added_users: Option<i64>,
    pub budget: Option<Decimal>,
    pub cost: Option<Decimal>,
    pub impression_delta: Option<i64>,
    pub line_items_created: usize,
    pub line_items_updated: usize,
    /// True when the campaign record was written, even if a later DSP step failed
    pub persisted: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaigns::{CampaignStatus, ConversionMultipliers};

    fn campaign(multipliers: Option<ConversionMultipliers>) -> Campaign {
        Campaign {
            id: "c1".to_string(),
            org: "org1".to_string(),
            name: None,
            status: CampaignStatus::Active,
            product_type: "app".to_string(),
            pricing: CampaignPricing {
                model: "cpm".to_string(),
                cost: None,
                budget: Some(dec!(10)),
                daily_limit: Some(dec!(5)),
            },
            target_users: None,
            conversion_multipliers: multipliers,
            external_id: None,
        }
    }

    fn config() -> RebalanceConfig {
        RebalanceConfig {
            default_multipliers: ConversionMultiplierDefaults {
                internal: dec!(2),
                external: dec!(3),
            },
            zero_allocation_policy: ZeroAllocationPolicy::Skip,
        }
    }

    #[test]
    fn test_multipliers_fall_back_to_defaults() {
        let resolved = config().resolve_multipliers(&campaign(None));
        assert_eq!(resolved.internal, dec!(2));
        assert_eq!(resolved.external, dec!(3));
    }

    #[test]
    fn test_multipliers_partial_override() {
        let resolved = config().resolve_multipliers(&campaign(Some(ConversionMultipliers {
            internal: None,
            external: Some(dec!(1.5)),
        })));
        assert_eq!(resolved.internal, dec!(2));
        assert_eq!(resolved.external, dec!(1.5));
    }

    #[test]
    fn test_config_validation() {
        assert!(RebalanceConfig::default().validate().is_ok());

        let mut invalid = config();
        invalid.default_multipliers.internal = Decimal::ZERO;
        assert!(matches!(
            invalid.validate(),
            Err(Error::InvalidConfigValue(_))
        ));
    }

    #[test]
    fn test_zero_allocation_policy_parsing() {
        assert_eq!(
            "Reject".parse::<ZeroAllocationPolicy>().unwrap(),
            ZeroAllocationPolicy::Reject
        );
        assert_eq!(
            " skip ".parse::<ZeroAllocationPolicy>().unwrap(),
            ZeroAllocationPolicy::Skip
        );
        assert!("clamp".parse::<ZeroAllocationPolicy>().is_err());
    }

    #[test]
    fn test_plan_update_keeps_daily_limit_and_sets_cpv() {
        let plan = RebalancePlan {
            campaign_id: "c1".to_string(),
            used: 10,
            target_users: 20,
            added_users: 20,
            budget: dec!(12.5),
            cost: dec!(0.625),
            external_impression_delta: 20,
        };
        let update = plan.to_update(&campaign(None).pricing);
        let pricing = update.pricing.unwrap();
        assert_eq!(update.target_users, Some(20));
        assert_eq!(pricing.model, "cpv");
        assert_eq!(pricing.cost, Some(dec!(0.625)));
        assert_eq!(pricing.budget, Some(dec!(12.5)));
        assert_eq!(pricing.daily_limit, Some(dec!(5)));
    }

    #[test]
    fn test_stage_persistence() {
        assert!(!SyncStage::Plan.is_persisted());
        assert!(!SyncStage::Update.is_persisted());
        assert!(SyncStage::BudgetAdjust.is_persisted());
        assert!(SyncStage::LineItems.is_persisted());
    }

    #[test]
    fn test_into_campaigns_surfaces_first_failure() {
        let report = RebalanceReport {
            run_id: Uuid::new_v4(),
            org_id: "org1".to_string(),
            cycle: None,
            fulfilled: 0,
            remaining: 0,
            outcomes: vec![
                CampaignRebalanceOutcome::Unchanged {
                    campaign: campaign(None),
                },
                CampaignRebalanceOutcome::Failed {
                    campaign_id: "c2".to_string(),
                    stage: SyncStage::Update,
                    error: Error::NotFound("campaign c2".to_string()),
                },
            ],
        };

        assert_eq!(report.failed_count(), 1);
        let summary = report.summary();
        assert_eq!(summary.campaigns[1].status, "failed");
        assert!(!summary.campaigns[1].persisted);

        let err = report.into_campaigns().unwrap_err();
        assert!(err.is_not_found());
    }
}
