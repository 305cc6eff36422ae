//! Showcase Core - Domain entities, services, and traits.
//!
//! This crate contains the campaign-budget rebalancing logic for Showcase.
//! It is transport-agnostic and defines traits that are implemented by the
//! `connect` crate over the platform and DSP HTTP APIs.

pub mod analytics;
pub mod billing;
pub mod campaigns;
pub mod constants;
pub mod dsp;
pub mod errors;
pub mod events;
pub mod rebalance;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
