//! Campaign domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{ELIGIBLE_PRODUCT_TYPE, SHOWCASE_APPLICATION};

/// Campaign lifecycle status as stored by the campaign API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CampaignStatus {
    Draft,
    New,
    Pending,
    Approved,
    Rejected,
    Active,
    Paused,
    Inactive,
    Expired,
    OutOfBudget,
    Error,
    Canceled,
    Deleted,
    /// Any status this build does not know yet. Counts as active.
    #[serde(other)]
    Unknown,
}

/// Pricing block of a campaign
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPricing {
    pub model: String,
    /// Per-view cost. Once set it is never recomputed by rebalancing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<Decimal>,
}

/// Per-campaign override of the organization-wide conversion multipliers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMultipliers {
    /// Users to billable views, used when deriving the per-view cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<Decimal>,
    /// Users to DSP impressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<Decimal>,
}

/// Domain model representing a Showcase campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub org: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: CampaignStatus,
    pub product_type: String,
    #[serde(default)]
    pub pricing: CampaignPricing,
    /// Cumulative unique-viewer goal for the current cycle
    #[serde(default)]
    pub target_users: Option<i64>,
    #[serde(default)]
    pub conversion_multipliers: Option<ConversionMultipliers>,
    /// Campaign reference inside the DSP account
    #[serde(default)]
    pub external_id: Option<String>,
}

impl Campaign {
    /// Only app campaigns share the organization's view quota.
    pub fn is_eligible(&self) -> bool {
        self.product_type == ELIGIBLE_PRODUCT_TYPE
    }

    /// Eligible and not canceled.
    pub fn is_active_eligible(&self) -> bool {
        self.is_eligible() && self.status != CampaignStatus::Canceled
    }
}

/// Filter for listing campaigns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignQuery {
    pub org: String,
    pub application: String,
}

impl CampaignQuery {
    /// All Showcase campaigns of an organization.
    pub fn showcase(org_id: &str) -> Self {
        Self {
            org: org_id.to_string(),
            application: SHOWCASE_APPLICATION.to_string(),
        }
    }
}

/// Partial update sent to the campaign API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_users: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<CampaignPricing>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn campaign(product_type: &str, status: CampaignStatus) -> Campaign {
        Campaign {
            id: "c1".to_string(),
            org: "org1".to_string(),
            name: None,
            status,
            product_type: product_type.to_string(),
            pricing: CampaignPricing::default(),
            target_users: None,
            conversion_multipliers: None,
            external_id: None,
        }
    }

    #[test]
    fn test_eligibility_by_product_type() {
        assert!(campaign("app", CampaignStatus::Active).is_eligible());
        assert!(!campaign("web", CampaignStatus::Active).is_eligible());
    }

    #[test]
    fn test_canceled_is_eligible_but_not_active() {
        let canceled = campaign("app", CampaignStatus::Canceled);
        assert!(canceled.is_eligible());
        assert!(!canceled.is_active_eligible());

        // Any other status counts as active for rebalancing
        assert!(campaign("app", CampaignStatus::Paused).is_active_eligible());
        assert!(campaign("app", CampaignStatus::OutOfBudget).is_active_eligible());
    }

    #[test]
    fn test_campaign_deserialization() {
        let json = r#"{
            "id": "c42",
            "org": "org7",
            "status": "outOfBudget",
            "productType": "app",
            "pricing": {"model": "cpv", "cost": 0.125, "budget": 150.5, "dailyLimit": 20},
            "targetUsers": 1000,
            "conversionMultipliers": {"external": 1.5},
            "externalId": "dsp-9"
        }"#;

        let c: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(c.status, CampaignStatus::OutOfBudget);
        assert_eq!(c.pricing.cost, Some(dec!(0.125)));
        assert_eq!(c.pricing.budget, Some(dec!(150.5)));
        assert_eq!(c.target_users, Some(1000));
        let multipliers = c.conversion_multipliers.unwrap();
        assert_eq!(multipliers.internal, None);
        assert_eq!(multipliers.external, Some(dec!(1.5)));
    }

    #[test]
    fn test_unknown_status_does_not_reject_listing() {
        let json = r#"[
            {"id": "c1", "org": "org1", "status": "active", "productType": "app"},
            {"id": "c2", "org": "org1", "status": "underReview", "productType": "app"},
            {"id": "c3", "org": "org1", "status": "canceled", "productType": "app"}
        ]"#;

        let campaigns: Vec<Campaign> = serde_json::from_str(json).unwrap();
        assert_eq!(campaigns.len(), 3);
        assert_eq!(campaigns[1].status, CampaignStatus::Unknown);
        assert!(campaigns[1].is_active_eligible());
        assert!(!campaigns[2].is_active_eligible());
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let patch = CampaignUpdate {
            target_users: Some(10),
            pricing: None,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"targetUsers": 10}));
    }
}
