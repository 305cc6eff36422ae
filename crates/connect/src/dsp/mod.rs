//! DSP adapters - low level API client and the sync service the rebalance
//! engine drives.

mod client;
mod models;
mod service;
mod traits;


pub use client::DspApiClient;
pub use models::{BudgetUpdate, LineItemUpdate, NewLineItem};
pub use service::DspSyncService;
pub use traits::DspApiClientTrait;
