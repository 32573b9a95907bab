// In crates/signals/src/policy.rs

use core_types::{
    AlertRecord, Band, Evaluation, EvaluationMode, IndicatorKind, IndicatorValue, PriceSeries,
    SignalConfig, Suggestion,
};
use tracing::debug;

/// The universal interface for turning an evaluation into alerts.
///
/// A policy is a pure function of the price series and the evaluation computed
/// from it. It performs no I/O and keeps no state between runs.
pub trait SignalPolicy: Send + Sync {
    /// The name of the policy (e.g. "dense", "edge_triggered").
    fn name(&self) -> &'static str;

    /// Produces the alerts for one run, oldest first.
    ///
    /// # Arguments
    ///
    /// * `series`: The price series the evaluation was computed from.
    /// * `evaluation`: Indicator values and suggestions aligned with `series`.
    fn alerts(&self, series: &PriceSeries, evaluation: &Evaluation) -> Vec<AlertRecord>;
}

/// Builds the policy matching an evaluation mode.
pub fn policy_for(mode: EvaluationMode, config: SignalConfig) -> Box<dyn SignalPolicy> {
    match mode {
        EvaluationMode::Dense => Box::new(DensePolicy),
        EvaluationMode::EdgeTriggered => Box::new(EdgeTriggeredPolicy::new(config)),
    }
}

fn record(signal: Suggestion, kind: IndicatorKind, value: f64, series: &PriceSeries, index: usize) -> Option<AlertRecord> {
    let point = series.get(index)?;
    Some(AlertRecord {
        signal,
        indicator_name: kind.name().to_string(),
        indicator_value: value,
        date: point.date_string(),
    })
}

/// Backtesting policy: one alert for every BUY or SELL bar.
///
/// A condition that holds for several bars alerts on each of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensePolicy;

impl SignalPolicy for DensePolicy {
    fn name(&self) -> &'static str {
        "dense"
    }

    fn alerts(&self, series: &PriceSeries, evaluation: &Evaluation) -> Vec<AlertRecord> {
        let alerts: Vec<AlertRecord> = evaluation
            .suggestions
            .iter()
            .enumerate()
            .filter(|(_, suggestion)| suggestion.is_actionable())
            .filter_map(|(i, suggestion)| {
                let value = evaluation.series.primary(i)?;
                record(*suggestion, evaluation.kind, value, series, i)
            })
            .collect();

        debug!(policy = self.name(), indicator = %evaluation.kind, alerts = alerts.len(), "Alerts generated.");
        alerts
    }
}

/// How a value has to move through a band to count as a crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Crossing {
    /// Oscillator style: BUY falling to/below `buy`, SELL rising to/above `sell`.
    Reversion(Band),
    /// Stochastic style: both %K and %D must move strictly past the level,
    /// matching the per-bar rule.
    Zone(Band),
    /// Momentum style: BUY rising above `buy`, SELL falling to/below `sell`.
    Momentum(Band),
}

/// Deployment policy: alerts only on the bar where the indicator value crosses
/// a threshold between the previous bar and the current one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTriggeredPolicy {
    config: SignalConfig,
}

impl EdgeTriggeredPolicy {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Resolves the thresholds for this run.
    ///
    /// SMA and EMA have no fixed bounds. Their thresholds are the booleans
    /// `close > value` and `close < value` taken once from the final bar and
    /// used as 1.0/0.0 constants for the whole scan.
    fn crossing(&self, series: &PriceSeries, evaluation: &Evaluation) -> Option<Crossing> {
        match evaluation.kind {
            IndicatorKind::Rsi => Some(Crossing::Reversion(self.config.rsi)),
            IndicatorKind::Stoch => Some(Crossing::Zone(self.config.stoch)),
            IndicatorKind::Macd => Some(Crossing::Momentum(self.config.macd)),
            IndicatorKind::Sma | IndicatorKind::Ema => {
                let last_close = series.last()?.close;
                let last_value = evaluation.series.primary(evaluation.series.len().checked_sub(1)?)?;
                let as_level = |condition: bool| if condition { 1.0 } else { 0.0 };
                Some(Crossing::Reversion(Band::new(
                    as_level(last_close > last_value),
                    as_level(last_close < last_value),
                )))
            }
        }
    }
}

// The level compared against the buy threshold. For the stochastic oscillator
// both lines must be below it, so the higher one decides.
fn buy_level(value: &IndicatorValue) -> f64 {
    match *value {
        IndicatorValue::Stoch { k, d } => k.max(d),
        _ => value.primary(),
    }
}

fn sell_level(value: &IndicatorValue) -> f64 {
    match *value {
        IndicatorValue::Stoch { k, d } => k.min(d),
        _ => value.primary(),
    }
}

impl Crossing {
    fn signal(&self, prev: &IndicatorValue, current: &IndicatorValue) -> Option<Suggestion> {
        match self {
            Crossing::Reversion(band) => {
                if buy_level(current) <= band.buy && buy_level(prev) > band.buy {
                    Some(Suggestion::Buy)
                } else if sell_level(current) >= band.sell && sell_level(prev) < band.sell {
                    Some(Suggestion::Sell)
                } else {
                    None
                }
            }
            Crossing::Zone(band) => {
                if buy_level(current) < band.buy && buy_level(prev) >= band.buy {
                    Some(Suggestion::Buy)
                } else if sell_level(current) > band.sell && sell_level(prev) <= band.sell {
                    Some(Suggestion::Sell)
                } else {
                    None
                }
            }
            Crossing::Momentum(band) => {
                if current.primary() > band.buy && prev.primary() <= band.buy {
                    Some(Suggestion::Buy)
                } else if current.primary() <= band.sell && prev.primary() > band.sell {
                    Some(Suggestion::Sell)
                } else {
                    None
                }
            }
        }
    }
}

impl SignalPolicy for EdgeTriggeredPolicy {
    fn name(&self) -> &'static str {
        "edge_triggered"
    }

    fn alerts(&self, series: &PriceSeries, evaluation: &Evaluation) -> Vec<AlertRecord> {
        let Some(crossing) = self.crossing(series, evaluation) else {
            return Vec::new();
        };

        let values = &evaluation.series;
        let alerts: Vec<AlertRecord> = (1..values.len())
            .filter_map(|i| {
                let prev = values.get(i - 1)?;
                let current = values.get(i)?;
                let signal = crossing.signal(prev, current)?;
                record(signal, evaluation.kind, current.primary(), series, i)
            })
            .collect();

        debug!(policy = self.name(), indicator = %evaluation.kind, ?crossing, alerts = alerts.len(), "Alerts generated.");
        alerts
    }
}
