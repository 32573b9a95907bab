// In crates/core-types/src/lib.rs

pub mod error;
pub mod indicator;
pub mod series;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use error::{Error, Result};
pub use indicator::{
    CrossoverParams, Evaluation, IndicatorKind, IndicatorParams, IndicatorSeries, IndicatorValue,
    MacdParams, RsiParams, StochParams,
};
pub use series::{PricePoint, PriceSeries};
pub use types::{AlertRecord, Band, EvaluationMode, MacdRule, SignalConfig, Suggestion, Symbol};
