//! DSP module - external budget and line-item models, and the sync contract
//! the rebalance engine consumes.

mod dsp_model;
mod dsp_traits;

pub use dsp_model::{
    ActiveLineItemsRequest, ExternalBudget, LineItem, LineItemStatus, LineItemUpsertResult,
};
pub use dsp_traits::DspSyncTrait;
