// In crates/core-types/src/types.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instrument identifier as understood by the market data source (e.g. "TATAMOTORS.NS").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The per-bar trading suggestion derived from an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suggestion {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Suggestion {
    /// True for BUY and SELL.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Suggestion::Hold)
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Suggestion::Buy => "BUY",
            Suggestion::Sell => "SELL",
            Suggestion::Hold => "HOLD",
        })
    }
}

/// One alert handed to an alert sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub signal: Suggestion,
    pub indicator_name: String,
    pub indicator_value: f64,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// How alerts are derived from an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Every BUY/SELL bar becomes an alert. Used for backtesting.
    Dense,
    /// Only bars where the indicator crosses a threshold. Used when deployed.
    EdgeTriggered,
}

/// A buy/sell threshold pair for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub buy: f64,
    pub sell: f64,
}

impl Band {
    pub const fn new(buy: f64, sell: f64) -> Self {
        Self { buy, sell }
    }
}

/// Which MACD condition drives the per-bar suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdRule {
    /// BUY while the histogram is positive, SELL otherwise.
    #[default]
    Histogram,
    /// BUY/SELL only on the bar where the MACD line crosses its signal line.
    SignalCross,
}

/// Thresholds and rule choices shared by the engine and the signal policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub rsi: Band,
    pub stoch: Band,
    pub macd: Band,
    pub macd_rule: MacdRule,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            rsi: Band::new(30.0, 70.0),
            stoch: Band::new(20.0, 80.0),
            macd: Band::new(0.0, 0.0),
            macd_rule: MacdRule::Histogram,
        }
    }
}
