//! Core error types for Showcase campaign rebalancing.
//!
//! This module defines transport-agnostic error types. Adapter crates (HTTP
//! clients for the campaign, billing, analytics and DSP APIs) convert their
//! failures into these types so the engine can reason about them uniformly.

use thiserror::Error;

use crate::rebalance::RebalanceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the rebalancing domain.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested remote record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The request never produced a usable response (connect, timeout, body read).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The remote API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rebalance failed: {0}")]
    Rebalance(#[from] RebalanceError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns true when the error denotes a missing remote record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Validation errors for remote writes and decoded payloads.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),

    /// A write was rejected by the remote store.
    #[error("Rejected by remote store: {0}")]
    Rejected(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}
