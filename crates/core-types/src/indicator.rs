// In crates/core-types/src/indicator.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Suggestion;

/// The indicators the engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    Stoch,
    Sma,
    Ema,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Stoch,
        IndicatorKind::Sma,
        IndicatorKind::Ema,
    ];

    /// The name used in alert messages.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Stoch => "STOCH",
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Ema => "EMA",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidParameter(format!("unknown indicator: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StochParams {
    /// Bars in the highest-high / lowest-low window of raw %K.
    pub k_period: usize,
    /// Smoothing window turning %K into %D.
    pub d_period: usize,
    /// Smoothing window applied to raw %K.
    pub lookback: usize,
}

impl Default for StochParams {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 4,
            lookback: 5,
        }
    }
}

/// Short/long window pair shared by the SMA and EMA crossovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossoverParams {
    pub short_period: usize,
    pub long_period: usize,
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self {
            short_period: 20,
            long_period: 50,
        }
    }
}

/// Parameters for one indicator run. The variant selects the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum IndicatorParams {
    Rsi(RsiParams),
    Macd(MacdParams),
    Stoch(StochParams),
    Sma(CrossoverParams),
    Ema(CrossoverParams),
}

impl IndicatorParams {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorParams::Rsi(_) => IndicatorKind::Rsi,
            IndicatorParams::Macd(_) => IndicatorKind::Macd,
            IndicatorParams::Stoch(_) => IndicatorKind::Stoch,
            IndicatorParams::Sma(_) => IndicatorKind::Sma,
            IndicatorParams::Ema(_) => IndicatorKind::Ema,
        }
    }
}

/// The computed value of an indicator on one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum IndicatorValue {
    Rsi(f64),
    Macd { macd: f64, signal: f64, histogram: f64 },
    Stoch { k: f64, d: f64 },
    Crossover { short: f64, long: f64 },
}

impl IndicatorValue {
    /// The single number reported in alerts and compared against thresholds.
    pub fn primary(&self) -> f64 {
        match *self {
            IndicatorValue::Rsi(value) => value,
            IndicatorValue::Macd { histogram, .. } => histogram,
            IndicatorValue::Stoch { k, .. } => k,
            IndicatorValue::Crossover { short, .. } => short,
        }
    }
}

/// Indicator values aligned index-for-index with the price series.
/// `None` marks the warm-up bars that lack enough history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSeries {
    values: Vec<Option<IndicatorValue>>,
}

impl IndicatorSeries {
    pub fn new(values: Vec<Option<IndicatorValue>>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorValue> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn values(&self) -> &[Option<IndicatorValue>] {
        &self.values
    }

    pub fn primary(&self, index: usize) -> Option<f64> {
        self.get(index).map(IndicatorValue::primary)
    }

    /// Number of leading undefined bars.
    pub fn warmup(&self) -> usize {
        self.values.iter().take_while(|v| v.is_none()).count()
    }
}

/// The output of one indicator pass: values plus a suggestion per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub kind: IndicatorKind,
    pub series: IndicatorSeries,
    pub suggestions: Vec<Suggestion>,
}
