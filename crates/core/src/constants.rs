/// Application tag of campaigns managed by Showcase
pub const SHOWCASE_APPLICATION: &str = "showcase";

/// Product type of campaigns that take part in quota rebalancing
pub const ELIGIBLE_PRODUCT_TYPE: &str = "app";

/// Pricing model written on every rebalanced campaign
pub const COST_PER_VIEW_MODEL: &str = "cpv";

/// Decimal places kept for campaign budgets (dollars and cents)
pub const BUDGET_DECIMAL_PRECISION: u32 = 2;

/// Decimal places kept for the derived per-view cost
pub const COST_DECIMAL_PRECISION: u32 = 3;
