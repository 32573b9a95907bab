// In crates/core-types/src/error.rs

use thiserror::Error;

/// Failures raised while evaluating an indicator over a price series.
///
/// Every variant aborts the run: the engine never hands back a partially
/// filled indicator series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Insufficient history: {required} bars required, {available} available")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Missing field `{field}` on bar {index}")]
    MissingField { field: &'static str, index: usize },

    /// Raised by a market data source; the core only passes it through.
    #[error("Market data unavailable: {0}")]
    DataUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
