// In crates/indicators/src/rules.rs

//! Per-bar suggestion rules. Each rule only sees defined indicator values; the
//! warm-up bars and crossover bars without a defined predecessor are HOLD.

use core_types::{Band, IndicatorParams, IndicatorValue, MacdRule, SignalConfig, Suggestion};

/// Oscillator thresholds: BUY at or below `band.buy`, SELL at or above `band.sell`.
pub fn threshold(value: f64, band: &Band) -> Suggestion {
    if value <= band.buy {
        Suggestion::Buy
    } else if value >= band.sell {
        Suggestion::Sell
    } else {
        Suggestion::Hold
    }
}

/// Two-state MACD rule: the histogram sign decides.
pub fn macd_histogram(histogram: f64) -> Suggestion {
    if histogram > 0.0 {
        Suggestion::Buy
    } else {
        Suggestion::Sell
    }
}

/// MACD line crossing its signal line between two bars.
pub fn macd_signal_cross(prev: (f64, f64), current: (f64, f64)) -> Suggestion {
    let (prev_macd, prev_signal) = prev;
    let (macd, signal) = current;
    if macd > signal && prev_macd <= prev_signal {
        Suggestion::Buy
    } else if macd < signal && prev_macd >= prev_signal {
        Suggestion::Sell
    } else {
        Suggestion::Hold
    }
}

/// Both %K and %D must sit beyond the band.
pub fn stochastic(k: f64, d: f64, band: &Band) -> Suggestion {
    if k > band.sell && d > band.sell {
        Suggestion::Sell
    } else if k < band.buy && d < band.buy {
        Suggestion::Buy
    } else {
        Suggestion::Hold
    }
}

/// Short average crossing the long one, in either direction.
pub fn sma_crossover(prev: (f64, f64), current: (f64, f64)) -> Suggestion {
    let (prev_short, prev_long) = prev;
    let (short, long) = current;
    if short > long && prev_short <= prev_long {
        Suggestion::Buy
    } else if short < long && prev_short >= prev_long {
        Suggestion::Sell
    } else {
        Suggestion::Hold
    }
}

/// BUY on the short/long upward cross; SELL when the close drops through the
/// short EMA. The exit deliberately ignores the long EMA.
pub fn ema_crossover(prev: (f64, f64), current: (f64, f64), prev_close: f64, close: f64) -> Suggestion {
    let (prev_short, prev_long) = prev;
    let (short, long) = current;
    if short > long && prev_short <= prev_long {
        Suggestion::Buy
    } else if close < short && prev_close >= prev_short {
        Suggestion::Sell
    } else {
        Suggestion::Hold
    }
}

/// Derives one suggestion per bar from an aligned value series.
pub fn suggest(
    params: &IndicatorParams,
    config: &SignalConfig,
    closes: &[f64],
    values: &[Option<IndicatorValue>],
) -> Vec<Suggestion> {
    (0..values.len())
        .map(|i| {
            let Some(current) = values[i] else {
                return Suggestion::Hold;
            };
            let prev = i.checked_sub(1).and_then(|p| values[p]);

            match (params, current, prev) {
                (IndicatorParams::Rsi(_), IndicatorValue::Rsi(value), _) => {
                    threshold(value, &config.rsi)
                }
                (IndicatorParams::Macd(_), IndicatorValue::Macd { histogram, .. }, _)
                    if config.macd_rule == MacdRule::Histogram =>
                {
                    macd_histogram(histogram)
                }
                (
                    IndicatorParams::Macd(_),
                    IndicatorValue::Macd { macd, signal, .. },
                    Some(IndicatorValue::Macd {
                        macd: prev_macd,
                        signal: prev_signal,
                        ..
                    }),
                ) => macd_signal_cross((prev_macd, prev_signal), (macd, signal)),
                (IndicatorParams::Stoch(_), IndicatorValue::Stoch { k, d }, _) => {
                    stochastic(k, d, &config.stoch)
                }
                (
                    IndicatorParams::Sma(_),
                    IndicatorValue::Crossover { short, long },
                    Some(IndicatorValue::Crossover {
                        short: prev_short,
                        long: prev_long,
                    }),
                ) => sma_crossover((prev_short, prev_long), (short, long)),
                (
                    IndicatorParams::Ema(_),
                    IndicatorValue::Crossover { short, long },
                    Some(IndicatorValue::Crossover {
                        short: prev_short,
                        long: prev_long,
                    }),
                ) => ema_crossover((prev_short, prev_long), (short, long), closes[i - 1], closes[i]),
                _ => Suggestion::Hold,
            }
        })
        .collect()
}
