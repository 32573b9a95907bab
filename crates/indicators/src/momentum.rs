// In crates/indicators/src/momentum.rs

use core_types::{Error, IndicatorValue, MacdParams, PriceSeries, Result, StochParams};
use ta::indicators::{
    FastStochastic, MovingAverageConvergenceDivergence as Macd, RelativeStrengthIndex as Rsi,
    SimpleMovingAverage as Sma,
};
use ta::{Close, High, Low, Next};

fn invalid(indicator: &str, err: ta::errors::TaError) -> Error {
    Error::InvalidParameter(format!("{} rejected its parameters: {:?}", indicator, err))
}

/// RSI over `period` bars. The first `period - 1` bars are undefined.
pub fn rsi(closes: &[f64], params: &core_types::RsiParams) -> Result<Vec<Option<IndicatorValue>>> {
    let mut rsi = Rsi::new(params.period).map_err(|e| invalid("RSI", e))?;
    let warmup = params.period - 1;

    Ok(closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let value = rsi.next(*close);
            (i >= warmup).then_some(IndicatorValue::Rsi(value))
        })
        .collect())
}

/// MACD line, signal line and histogram.
pub fn macd(closes: &[f64], params: &MacdParams) -> Result<Vec<Option<IndicatorValue>>> {
    let mut macd = Macd::new(params.fast_period, params.slow_period, params.signal_period)
        .map_err(|e| invalid("MACD", e))?;
    let warmup = (params.slow_period - 1) + (params.signal_period - 1);

    Ok(closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let out = macd.next(*close);
            (i >= warmup).then_some(IndicatorValue::Macd {
                macd: out.macd,
                signal: out.signal,
                histogram: out.histogram,
            })
        })
        .collect())
}

// The view of a bar the stochastic oscillator needs.
struct RangeBar {
    high: f64,
    low: f64,
    close: f64,
}

impl High for RangeBar {
    fn high(&self) -> f64 {
        self.high
    }
}

impl Low for RangeBar {
    fn low(&self) -> f64 {
        self.low
    }
}

impl Close for RangeBar {
    fn close(&self) -> f64 {
        self.close
    }
}

/// Fails with `MissingField` on the first bar lacking a low or a high.
pub fn require_range(series: &PriceSeries) -> Result<()> {
    for (index, point) in series.points().iter().enumerate() {
        if point.low.is_none() {
            return Err(Error::MissingField { field: "low", index });
        }
        if point.high.is_none() {
            return Err(Error::MissingField { field: "high", index });
        }
    }
    Ok(())
}

/// Slow stochastic: raw %K over `k_period` bars smoothed by an SMA of
/// `lookback` bars, and %D as an SMA of %K over `d_period` bars.
pub fn stochastic(series: &PriceSeries, params: &StochParams) -> Result<Vec<Option<IndicatorValue>>> {
    let mut raw_k = FastStochastic::new(params.k_period).map_err(|e| invalid("STOCH", e))?;
    let mut slow_k = Sma::new(params.lookback).map_err(|e| invalid("STOCH", e))?;
    let mut slow_d = Sma::new(params.d_period).map_err(|e| invalid("STOCH", e))?;
    let warmup = (params.k_period - 1) + (params.lookback - 1) + (params.d_period - 1);

    let mut values = Vec::with_capacity(series.len());
    for (index, point) in series.points().iter().enumerate() {
        let bar = RangeBar {
            high: point.high.ok_or(Error::MissingField { field: "high", index })?,
            low: point.low.ok_or(Error::MissingField { field: "low", index })?,
            close: point.close,
        };
        let k = slow_k.next(raw_k.next(&bar));
        let d = slow_d.next(k);
        values.push((index >= warmup).then_some(IndicatorValue::Stoch { k, d }));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{PricePoint, RsiParams};

    fn ranged_series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        PriceSeries::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    PricePoint::close_only(start + chrono::Duration::days(i as i64), c)
                        .with_range(c - 1.0, c + 1.0)
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rsi_stays_within_bounds() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        let values = rsi(&closes, &RsiParams { period: 14 }).unwrap();
        assert_eq!(values.len(), closes.len());
        for value in values.iter().flatten() {
            let v = value.primary();
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {}", v);
        }
    }

    #[test]
    fn macd_histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..60).map(|i| 50.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let values = macd(&closes, &MacdParams::default()).unwrap();
        for value in values.iter().flatten() {
            if let IndicatorValue::Macd {
                macd,
                signal,
                histogram,
            } = value
            {
                assert!((histogram - (macd - signal)).abs() < 1e-9);
            } else {
                panic!("expected a MACD value");
            }
        }
    }

    #[test]
    fn stochastic_pins_high_on_a_rally() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 2.0).collect();
        let params = StochParams {
            k_period: 5,
            d_period: 3,
            lookback: 3,
        };
        let values = stochastic(&ranged_series(&closes), &params).unwrap();
        assert_eq!(values.iter().take_while(|v| v.is_none()).count(), 4 + 2 + 2);
        match values.last().unwrap() {
            Some(IndicatorValue::Stoch { k, d }) => {
                assert!(*k > 80.0);
                assert!(*d > 80.0);
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn missing_range_is_reported_with_its_bar() {
        let mut points = ranged_series(&[1.0, 2.0, 3.0]).points().to_vec();
        points[1].high = None;
        let series = PriceSeries::new(points).unwrap();
        assert_eq!(
            require_range(&series).unwrap_err(),
            Error::MissingField {
                field: "high",
                index: 1
            }
        );
    }
}
