// In crates/indicators/src/lib.rs

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod rules;

pub use engine::{IndicatorEngine, required_bars, validate, warmup};
