// In crates/indicators/src/engine.rs

use core_types::{
    Error, Evaluation, IndicatorParams, IndicatorSeries, PriceSeries, Result, SignalConfig,
};
use tracing::debug;

use crate::{momentum, moving_average, rules};

/// Evaluates one indicator over a price series and derives a suggestion per bar.
///
/// The engine holds no state between runs; `compute` is a pure function of the
/// series, the parameters and the thresholds it was built with.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: SignalConfig,
}

impl IndicatorEngine {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Computes the indicator selected by `params` and the matching suggestions.
    ///
    /// Checks run in order: parameters (`InvalidParameter`), required fields
    /// (`MissingField`), then history length (`InsufficientHistory`). Any
    /// failure aborts the whole run.
    pub fn compute(&self, series: &PriceSeries, params: &IndicatorParams) -> Result<Evaluation> {
        validate(params)?;
        if let IndicatorParams::Stoch(_) = params {
            momentum::require_range(series)?;
        }

        let required = required_bars(params)?;
        if series.len() < required {
            return Err(Error::InsufficientHistory {
                required,
                available: series.len(),
            });
        }

        let closes = series.closes();
        let values = match params {
            IndicatorParams::Rsi(p) => momentum::rsi(&closes, p)?,
            IndicatorParams::Macd(p) => momentum::macd(&closes, p)?,
            IndicatorParams::Stoch(p) => momentum::stochastic(series, p)?,
            IndicatorParams::Sma(p) => moving_average::sma_crossover(&closes, p)?,
            IndicatorParams::Ema(p) => moving_average::ema_crossover(&closes, p)?,
        };
        let suggestions = rules::suggest(params, &self.config, &closes, &values);

        let kind = params.kind();
        let series = IndicatorSeries::new(values);
        debug!(
            indicator = %kind,
            bars = series.len(),
            warmup = series.warmup(),
            actionable = suggestions.iter().filter(|s| s.is_actionable()).count(),
            "Indicator evaluated."
        );

        Ok(Evaluation {
            kind,
            series,
            suggestions,
        })
    }
}

/// Rejects zero periods, inverted window pairs and windows too long to count.
pub fn validate(params: &IndicatorParams) -> Result<()> {
    let periods: Vec<(&str, usize)> = match params {
        IndicatorParams::Rsi(p) => vec![("period", p.period)],
        IndicatorParams::Macd(p) => vec![
            ("fast_period", p.fast_period),
            ("slow_period", p.slow_period),
            ("signal_period", p.signal_period),
        ],
        IndicatorParams::Stoch(p) => vec![
            ("k_period", p.k_period),
            ("d_period", p.d_period),
            ("lookback", p.lookback),
        ],
        IndicatorParams::Sma(p) | IndicatorParams::Ema(p) => vec![
            ("short_period", p.short_period),
            ("long_period", p.long_period),
        ],
    };
    if let Some((name, _)) = periods.iter().find(|(_, period)| *period == 0) {
        return Err(Error::InvalidParameter(format!(
            "{} {} must be greater than zero",
            params.kind(),
            name
        )));
    }

    required_bars(params)?;

    match params {
        IndicatorParams::Macd(p) if p.fast_period >= p.slow_period => {
            Err(Error::InvalidParameter(format!(
                "MACD fast_period ({}) must be less than slow_period ({})",
                p.fast_period, p.slow_period
            )))
        }
        IndicatorParams::Sma(p) | IndicatorParams::Ema(p) if p.short_period >= p.long_period => {
            Err(Error::InvalidParameter(format!(
                "{} short_period ({}) must be less than long_period ({})",
                params.kind(),
                p.short_period,
                p.long_period
            )))
        }
        _ => Ok(()),
    }
}

/// Number of leading bars left undefined before every window is populated.
///
/// Saturates at `usize::MAX`; `validate` rejects parameters that get there.
pub fn warmup(params: &IndicatorParams) -> usize {
    checked_warmup(params).unwrap_or(usize::MAX)
}

/// Bars needed for at least one defined value.
pub fn required_bars(params: &IndicatorParams) -> Result<usize> {
    checked_warmup(params)
        .and_then(|w| w.checked_add(1))
        .ok_or_else(|| {
            Error::InvalidParameter(format!("{} windows are too long to evaluate", params.kind()))
        })
}

fn checked_warmup(params: &IndicatorParams) -> Option<usize> {
    match params {
        IndicatorParams::Rsi(p) => Some(p.period.saturating_sub(1)),
        IndicatorParams::Macd(p) => p
            .slow_period
            .saturating_sub(1)
            .checked_add(p.signal_period.saturating_sub(1)),
        IndicatorParams::Stoch(p) => p
            .k_period
            .saturating_sub(1)
            .checked_add(p.lookback.saturating_sub(1))?
            .checked_add(p.d_period.saturating_sub(1)),
        IndicatorParams::Sma(p) | IndicatorParams::Ema(p) => Some(p.long_period.saturating_sub(1)),
    }
}
