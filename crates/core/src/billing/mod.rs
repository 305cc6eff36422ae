//! Billing module - billing cycle model and lookup trait.

mod billing_model;
mod billing_traits;

pub use billing_model::BillingCycle;
pub use billing_traits::BillingCycleLookupTrait;
