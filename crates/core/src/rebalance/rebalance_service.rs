use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{join_all, try_join_all};
use log::{debug, info, warn};
use uuid::Uuid;

use super::rebalance_errors::RebalanceError;
use super::rebalance_math::{compute_plan, quota_share};
use super::rebalance_model::{
    CampaignRebalanceOutcome, RebalanceConfig, RebalanceReport, SyncStage, ZeroAllocationPolicy,
};
use super::rebalance_traits::RebalanceServiceTrait;
use crate::analytics::AnalyticsReaderTrait;
use crate::billing::{BillingCycle, BillingCycleLookupTrait};
use crate::campaigns::{Campaign, CampaignQuery, CampaignRepositoryTrait};
use crate::dsp::{ActiveLineItemsRequest, DspSyncTrait};
use crate::errors::{Error, Result};

/// Redistributes an organization's cycle quota across its active app campaigns.
///
/// Each run reads campaigns, the billing cycle and per-campaign consumption,
/// then runs one chain per active campaign:
/// plan -> campaign update -> DSP budget adjust -> DSP line-item upsert.
/// Chains run concurrently and are never rolled back. Two runs for the same
/// organization are not serialized against each other; the last write wins.
pub struct RebalanceService {
    campaign_repository: Arc<dyn CampaignRepositoryTrait>,
    billing_lookup: Arc<dyn BillingCycleLookupTrait>,
    analytics_reader: Arc<dyn AnalyticsReaderTrait>,
    dsp_sync: Arc<dyn DspSyncTrait>,
    config: RebalanceConfig,
}

/// Inputs shared by every campaign chain of one run.
struct RunContext<'a> {
    run_id: Uuid,
    cycle: &'a BillingCycle,
    usage: HashMap<String, i64>,
    share: i64,
}

impl RebalanceService {
    pub fn new(
        campaign_repository: Arc<dyn CampaignRepositoryTrait>,
        billing_lookup: Arc<dyn BillingCycleLookupTrait>,
        analytics_reader: Arc<dyn AnalyticsReaderTrait>,
        dsp_sync: Arc<dyn DspSyncTrait>,
        config: RebalanceConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            campaign_repository,
            billing_lookup,
            analytics_reader,
            dsp_sync,
            config,
        })
    }

    /// Runs one campaign's chain and folds any failure into the outcome.
    async fn rebalance_campaign(
        &self,
        campaign: Campaign,
        ctx: &RunContext<'_>,
    ) -> CampaignRebalanceOutcome {
        let campaign_id = campaign.id.clone();
        match self.sync_campaign(campaign, ctx).await {
            Ok(outcome) => outcome,
            Err((stage, error)) => {
                warn!(
                    "[Rebalance] Campaign {} failed at {:?} (run {}): {}",
                    campaign_id, stage, ctx.run_id, error
                );
                CampaignRebalanceOutcome::Failed {
                    campaign_id,
                    stage,
                    error,
                }
            }
        }
    }

    async fn sync_campaign(
        &self,
        campaign: Campaign,
        ctx: &RunContext<'_>,
    ) -> std::result::Result<CampaignRebalanceOutcome, (SyncStage, Error)> {
        let multipliers = self.config.resolve_multipliers(&campaign);
        let used = *ctx.usage.get(&campaign.id).ok_or_else(|| {
            (
                SyncStage::Plan,
                Error::from(RebalanceError::MissingUsage(campaign.id.clone())),
            )
        })?;

        let plan = match compute_plan(&campaign, used, ctx.share, ctx.cycle, &multipliers) {
            Ok(plan) => plan,
            Err(reason @ RebalanceError::UndefinedCost { .. })
                if self.config.zero_allocation_policy == ZeroAllocationPolicy::Skip =>
            {
                warn!("[Rebalance] Skipping campaign {}: {}", campaign.id, reason);
                return Ok(CampaignRebalanceOutcome::Skipped { campaign, reason });
            }
            Err(err) => return Err((SyncStage::Plan, err.into())),
        };

        debug!(
            "[Rebalance] Campaign {}: used={} target={} added={} budget={} cost={}",
            campaign.id, plan.used, plan.target_users, plan.added_users, plan.budget, plan.cost
        );

        let updated = self
            .campaign_repository
            .update(&campaign.id, plan.to_update(&campaign.pricing))
            .await
            .map_err(|e| (SyncStage::Update, e))?;

        let (budget_before, budget_after) = self
            .dsp_sync
            .adjust_campaign_budget(&updated, plan.external_impression_delta)
            .await
            .map_err(|e| (SyncStage::BudgetAdjust, e))?;
        info!(
            "[Rebalance] Campaign {} external budget {}: {} -> {} impressions",
            updated.id, budget_after.external_id, budget_before.impressions, budget_after.impressions
        );

        let line_items = self
            .dsp_sync
            .upsert_campaign_active_line_items(ActiveLineItemsRequest {
                campaign: updated.clone(),
                start_date: ctx.cycle.cycle_start,
                end_date: ctx.cycle.cycle_end,
            })
            .await
            .map_err(|e| (SyncStage::LineItems, e))?;
        for item in &line_items.created_line_items {
            info!(
                "[Rebalance] Campaign {} created line item {}",
                updated.id, item.id
            );
        }
        for item in &line_items.updated_line_items {
            info!(
                "[Rebalance] Campaign {} updated line item {}",
                updated.id, item.id
            );
        }

        Ok(CampaignRebalanceOutcome::Updated {
            campaign: updated,
            plan,
            budget_before,
            budget_after,
            line_items,
        })
    }
}

#[async_trait]
impl RebalanceServiceTrait for RebalanceService {
    async fn rebalance(&self, org_id: &str) -> Result<Vec<Campaign>> {
        self.rebalance_report(org_id).await?.into_campaigns()
    }

    async fn rebalance_report(&self, org_id: &str) -> Result<RebalanceReport> {
        let run_id = Uuid::new_v4();
        let query = CampaignQuery::showcase(org_id);
        info!("[Rebalance] Starting run {} for org {}", run_id, org_id);

        let (campaigns, cycle) = futures::join!(
            self.campaign_repository.list(&query),
            self.billing_lookup.current_cycle(org_id)
        );
        let campaigns = campaigns?;

        let cycle = match cycle {
            Ok(cycle) => cycle,
            Err(err) => {
                let active: Vec<Campaign> = campaigns
                    .into_iter()
                    .filter(Campaign::is_active_eligible)
                    .collect();
                if err.is_not_found() {
                    info!(
                        "[Rebalance] No billing cycle for org {} yet, leaving {} campaign(s) unchanged",
                        org_id,
                        active.len()
                    );
                } else {
                    warn!(
                        "[Rebalance] Billing cycle lookup failed for org {}, leaving {} campaign(s) unchanged: {}",
                        org_id,
                        active.len(),
                        err
                    );
                }
                return Ok(RebalanceReport::unchanged(run_id, org_id, active));
            }
        };

        let eligible: Vec<Campaign> = campaigns.into_iter().filter(Campaign::is_eligible).collect();
        let active: Vec<Campaign> = eligible
            .iter()
            .filter(|c| c.is_active_eligible())
            .cloned()
            .collect();

        if active.is_empty() {
            info!("[Rebalance] Org {} has no active app campaigns", org_id);
            return Ok(RebalanceReport {
                run_id,
                org_id: org_id.to_string(),
                cycle: Some(cycle),
                fulfilled: 0,
                remaining: 0,
                outcomes: Vec::new(),
            });
        }
        if cycle.total_views <= 0 {
            return Err(RebalanceError::InvalidCycle(cycle.total_views).into());
        }

        // Canceled campaigns still consumed part of the quota.
        let snapshots = try_join_all(
            eligible
                .iter()
                .map(|c| self.analytics_reader.cycle_usage(&c.id)),
        )
        .await?;

        let fulfilled: i64 = snapshots.iter().map(|s| s.cycle_users).sum();
        let remaining = cycle.total_views - fulfilled;
        let share = quota_share(remaining, active.len())?;
        info!(
            "[Rebalance] Org {}: {} active of {} eligible, fulfilled={} remaining={} share={}",
            org_id,
            active.len(),
            eligible.len(),
            fulfilled,
            remaining,
            share
        );

        let ctx = RunContext {
            run_id,
            cycle: &cycle,
            usage: snapshots
                .into_iter()
                .map(|s| (s.campaign_id, s.cycle_users))
                .collect(),
            share,
        };

        let outcomes = join_all(
            active
                .into_iter()
                .map(|campaign| self.rebalance_campaign(campaign, &ctx)),
        )
        .await;

        let report = RebalanceReport {
            run_id,
            org_id: org_id.to_string(),
            cycle: Some(cycle.clone()),
            fulfilled,
            remaining,
            outcomes,
        };
        info!(
            "[Rebalance] Finished run {} for org {}: {} campaign(s), {} failed",
            run_id,
            org_id,
            report.outcomes.len(),
            report.failed_count()
        );
        Ok(report)
    }
}
